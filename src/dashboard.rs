// Dashboard controller: owns the registry and the ingestor, and is the only place that mutates either.
// Local state commits first; probe notifications are best-effort and never roll it back.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::TargetError;
use crate::history_repo::{LatencyHistoryRepo, RetentionPolicy};
use crate::ingest::{EventIngestor, IngestOutcome, IngestStats};
use crate::models::{
    ChartSeries, MonitoredTarget, PingSample, TargetStatus, TracerouteSnapshot,
};
use crate::probe_link::{ControlMessage, ProbeEvent, ProbeOutbound};
use crate::projection;
use crate::registry::TargetRegistry;

/// Change notification for live views; published after each applied mutation or event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DashboardUpdate {
    TargetAdded { target: MonitoredTarget },
    TargetRemoved { address: String },
    Ping { sample: PingSample },
    Route { snapshot: TracerouteSnapshot },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub targets: usize,
    pub samples: usize,
    pub routes: usize,
    pub pings_applied: u64,
    pub routes_applied: u64,
    pub orphans_discarded: u64,
    pub samples_evicted: u64,
    pub notify_failures: u64,
}

pub struct Dashboard {
    registry: TargetRegistry,
    ingestor: EventIngestor,
    outbound: ProbeOutbound,
    updates: broadcast::Sender<DashboardUpdate>,
    notify_failures: u64,
}

impl Dashboard {
    pub fn new(
        outbound: ProbeOutbound,
        retention: RetentionPolicy,
        updates: broadcast::Sender<DashboardUpdate>,
    ) -> Self {
        Self {
            registry: TargetRegistry::new(),
            ingestor: EventIngestor::new(retention),
            outbound,
            updates,
            notify_failures: 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardUpdate> {
        self.updates.subscribe()
    }

    pub(crate) fn updates_sender(&self) -> broadcast::Sender<DashboardUpdate> {
        self.updates.clone()
    }

    /// Registers `address` and asks the backend to start probing it.
    pub fn add_target(
        &mut self,
        address: &str,
        label: Option<&str>,
    ) -> Result<MonitoredTarget, TargetError> {
        let target = self.registry.add(address, label).inspect_err(|e| {
            tracing::debug!(error = %e, operation = "add_target", "Target not added");
        })?;
        tracing::info!(address = %target.address, label = %target.label, "Target added");
        self.notify(ControlMessage::AddIp(target.address.clone()));
        self.publish(DashboardUpdate::TargetAdded {
            target: target.clone(),
        });
        Ok(target)
    }

    /// Unregisters `address`, purges its data, and asks the backend to stop probing it.
    pub fn remove_target(&mut self, address: &str) -> Result<MonitoredTarget, TargetError> {
        let target = self.registry.remove(address).inspect_err(|e| {
            tracing::debug!(error = %e, operation = "remove_target", "Target not removed");
        })?;
        self.ingestor.purge(&target.address);
        tracing::info!(address = %target.address, "Target removed");
        self.notify(ControlMessage::RemoveIp(target.address.clone()));
        self.publish(DashboardUpdate::TargetRemoved {
            address: target.address.clone(),
        });
        Ok(target)
    }

    pub fn handle_event(&mut self, event: ProbeEvent) -> IngestOutcome {
        let outcome = self.ingestor.ingest(&self.registry, event);
        match &outcome {
            IngestOutcome::Appended(sample) => self.publish(DashboardUpdate::Ping {
                sample: sample.clone(),
            }),
            IngestOutcome::Replaced(snapshot) => self.publish(DashboardUpdate::Route {
                snapshot: snapshot.clone(),
            }),
            IngestOutcome::Discarded => {}
        }
        outcome
    }

    // Queries accept the same padded input as add/remove.
    pub fn is_monitored(&self, address: &str) -> bool {
        self.registry.contains(TargetRegistry::normalize(address))
    }

    pub fn targets(&self) -> &[MonitoredTarget] {
        self.registry.list()
    }

    pub fn current_status(&self, address: &str) -> Option<TargetStatus> {
        self.registry
            .get(TargetRegistry::normalize(address))
            .map(|t| self.status_of(t))
    }

    /// Status rows for every target in registry order.
    pub fn statuses(&self) -> Vec<TargetStatus> {
        self.registry.list().iter().map(|t| self.status_of(t)).collect()
    }

    pub fn current_route(&self, address: &str) -> Option<&TracerouteSnapshot> {
        self.ingestor.routes().get(TargetRegistry::normalize(address))
    }

    /// Latency series for a registered target; `None` when it is not monitored.
    pub fn series(&self, address: &str) -> Option<ChartSeries> {
        self.registry.get(TargetRegistry::normalize(address)).map(|t| {
            projection::project(self.ingestor.history(), &t.address, Some(&t.label))
        })
    }

    pub fn history(&self) -> &LatencyHistoryRepo {
        self.ingestor.history()
    }

    pub fn stats(&self) -> DashboardStats {
        let IngestStats {
            pings_applied,
            routes_applied,
            orphans_discarded,
            samples_evicted,
        } = self.ingestor.stats();
        DashboardStats {
            targets: self.registry.len(),
            samples: self.ingestor.history().total_samples(),
            routes: self.ingestor.routes().len(),
            pings_applied,
            routes_applied,
            orphans_discarded,
            samples_evicted,
            notify_failures: self.notify_failures,
        }
    }

    fn status_of(&self, target: &MonitoredTarget) -> TargetStatus {
        TargetStatus {
            address: target.address.clone(),
            label: target.label.clone(),
            latest: self.ingestor.history().latest_for(&target.address).cloned(),
        }
    }

    fn notify(&mut self, msg: ControlMessage) {
        if let Err(e) = self.outbound.notify(msg.clone()) {
            self.notify_failures += 1;
            tracing::warn!(
                error = %e,
                address = %msg.address(),
                operation = "notify_backend",
                "Probe backend not notified; local state kept"
            );
        }
    }

    fn publish(&self, update: DashboardUpdate) {
        // No live viewers is normal.
        let _ = self.updates.send(update);
    }
}
