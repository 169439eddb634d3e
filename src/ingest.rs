// Event ingestor: routes probe telemetry into the per-target stores.
// Events for unregistered addresses are expected (remove races an in-flight probe) and dropped quietly.

use crate::history_repo::{LatencyHistoryRepo, RetentionPolicy};
use crate::models::{PingSample, TracerouteSnapshot};
use crate::probe_link::ProbeEvent;
use crate::registry::TargetRegistry;
use crate::route_repo::RouteRepo;

/// What happened to one inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Appended(PingSample),
    Replaced(TracerouteSnapshot),
    Discarded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub pings_applied: u64,
    pub routes_applied: u64,
    pub orphans_discarded: u64,
    pub samples_evicted: u64,
}

#[derive(Debug, Default)]
pub struct EventIngestor {
    history: LatencyHistoryRepo,
    routes: RouteRepo,
    stats: IngestStats,
}

impl EventIngestor {
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            history: LatencyHistoryRepo::new(retention),
            routes: RouteRepo::new(),
            stats: IngestStats::default(),
        }
    }

    /// Applies one event, in arrival order, if its address is still registered.
    pub fn ingest(&mut self, registry: &TargetRegistry, event: ProbeEvent) -> IngestOutcome {
        if !registry.contains(event.address()) {
            self.stats.orphans_discarded += 1;
            tracing::debug!(
                address = %event.address(),
                kind = event.kind(),
                "Discarding event for unmonitored target"
            );
            return IngestOutcome::Discarded;
        }

        match event {
            ProbeEvent::PingResult(payload) => {
                let sample = payload.into_sample();
                let evicted = self.history.append(sample.clone());
                self.stats.pings_applied += 1;
                self.stats.samples_evicted += evicted as u64;
                IngestOutcome::Appended(sample)
            }
            ProbeEvent::TracerouteResult(payload) => {
                let snapshot = payload.into_snapshot();
                self.routes.set(snapshot.clone());
                self.stats.routes_applied += 1;
                IngestOutcome::Replaced(snapshot)
            }
        }
    }

    /// Drops all history and the route for `address`.
    pub fn purge(&mut self, address: &str) {
        let samples = self.history.purge(address);
        let had_route = self.routes.purge(address);
        tracing::debug!(address = %address, samples, had_route, "Purged target data");
    }

    pub fn history(&self) -> &LatencyHistoryRepo {
        &self.history
    }

    pub fn routes(&self) -> &RouteRepo {
        &self.routes
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}
