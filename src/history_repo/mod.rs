// In-memory latency history, one bounded ring per target.
// Samples are kept in arrival order; nothing here ever re-sorts by timestamp.

mod retention;

pub use retention::{DEFAULT_MAX_SAMPLES, RetentionPolicy};

use crate::models::PingSample;
use std::collections::{HashMap, VecDeque};
use std::collections::vec_deque::Iter;

static EMPTY: VecDeque<PingSample> = VecDeque::new();

#[derive(Debug, Default)]
pub struct LatencyHistoryRepo {
    samples: HashMap<String, VecDeque<PingSample>>,
    retention: RetentionPolicy,
}

impl LatencyHistoryRepo {
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            samples: HashMap::new(),
            retention,
        }
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Appends to the sample's target history, then applies retention.
    /// Returns how many old samples were evicted.
    pub fn append(&mut self, sample: PingSample) -> usize {
        let cutoff = self.retention.age_cutoff(sample.observed_at);
        let max_samples = self.retention.max_samples.max(1);
        let ring = self
            .samples
            .entry(sample.address.clone())
            .or_insert_with(|| VecDeque::with_capacity(max_samples.min(64)));
        ring.push_back(sample);

        let mut evicted = 0;
        while ring.len() > max_samples {
            ring.pop_front();
            evicted += 1;
        }
        if let Some(cutoff) = cutoff {
            while ring.front().is_some_and(|s| s.observed_at < cutoff) {
                ring.pop_front();
                evicted += 1;
            }
        }
        evicted
    }

    /// Full retained history for `address`, oldest arrival first.
    pub fn all_for(&self, address: &str) -> Iter<'_, PingSample> {
        self.samples.get(address).unwrap_or(&EMPTY).iter()
    }

    pub fn latest_for(&self, address: &str) -> Option<&PingSample> {
        self.samples.get(address).and_then(VecDeque::back)
    }

    pub fn len_for(&self, address: &str) -> usize {
        self.samples.get(address).map_or(0, VecDeque::len)
    }

    /// Drops every sample for `address`. Returns the number dropped.
    pub fn purge(&mut self, address: &str) -> usize {
        self.samples.remove(address).map_or(0, |ring| ring.len())
    }

    pub fn target_count(&self) -> usize {
        self.samples.len()
    }

    pub fn total_samples(&self) -> usize {
        self.samples.values().map(VecDeque::len).sum()
    }
}
