// Per-target retention bounds for latency history

/// Caps a single target's history by sample count and, optionally, by age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_samples: usize,
    /// Samples older than the newest sample minus this window are evicted.
    pub max_age_ms: Option<u64>,
}

pub const DEFAULT_MAX_SAMPLES: usize = 300;

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
            max_age_ms: None,
        }
    }
}

impl RetentionPolicy {
    pub fn with_max_samples(max_samples: usize) -> Self {
        Self {
            max_samples: max_samples.max(1),
            max_age_ms: None,
        }
    }

    pub fn with_max_age_ms(mut self, max_age_ms: u64) -> Self {
        self.max_age_ms = Some(max_age_ms);
        self
    }

    /// Oldest `observed_at` still retained once a sample at `newest` has arrived.
    pub(crate) fn age_cutoff(&self, newest: u64) -> Option<u64> {
        self.max_age_ms.map(|age| newest.saturating_sub(age))
    }
}
