// Shared test helpers
#![allow(dead_code)]

use pingboard::dashboard::{Dashboard, DashboardUpdate};
use pingboard::history_repo::RetentionPolicy;
use pingboard::probe_link::{
    HopPayload, PingResultPayload, ProbeBackend, ProbeEvent, ProbeLink, TracerouteResultPayload,
};
use pingboard::models::PingOutcome;
use tokio::sync::{broadcast, mpsc};

pub fn ping(ip: &str, latency: f64, timestamp: u64) -> ProbeEvent {
    ProbeEvent::PingResult(PingResultPayload {
        ip: ip.into(),
        latency,
        status: PingOutcome::Success,
        timestamp,
    })
}

pub fn failed_ping(ip: &str, timestamp: u64) -> ProbeEvent {
    ProbeEvent::PingResult(PingResultPayload {
        ip: ip.into(),
        latency: 0.0,
        status: PingOutcome::Failed,
        timestamp,
    })
}

/// Hops given as (address, latency); hop numbers start at 1.
pub fn traceroute(ip: &str, hops: &[(&str, f64)]) -> ProbeEvent {
    ProbeEvent::TracerouteResult(TracerouteResultPayload {
        ip: ip.into(),
        hops: hops
            .iter()
            .enumerate()
            .map(|(i, (address, latency))| HopPayload {
                hop: i as u32 + 1,
                address: (*address).into(),
                latency: *latency,
            })
            .collect(),
    })
}

pub struct TestBoard {
    pub dashboard: Dashboard,
    pub backend: ProbeBackend,
    pub inbound: mpsc::Receiver<ProbeEvent>,
    pub updates: broadcast::Receiver<DashboardUpdate>,
}

pub fn board_with(retention: RetentionPolicy) -> TestBoard {
    let (link, backend) = ProbeLink::channel(16, 16);
    let (tx, updates) = broadcast::channel(64);
    TestBoard {
        dashboard: Dashboard::new(link.outbound, retention, tx),
        backend,
        inbound: link.inbound,
        updates,
    }
}

pub fn board() -> TestBoard {
    board_with(RetentionPolicy::default())
}
