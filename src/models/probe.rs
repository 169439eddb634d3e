// Ping and traceroute models

use serde::{Deserialize, Serialize};

/// Result of a single ping probe; serializes to lowercase JSON ("success" / "failed").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PingOutcome {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingSample {
    pub address: String,
    pub latency_ms: f64,
    pub outcome: PingOutcome,
    /// Epoch millis as reported by the probing backend.
    pub observed_at: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    /// 1-based position along the route.
    pub index: u32,
    pub address: String,
    pub latency_ms: f64,
}

/// Latest known route to a target. Replaced wholesale on every traceroute result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracerouteSnapshot {
    pub address: String,
    pub hops: Vec<Hop>,
}

impl TracerouteSnapshot {
    /// Last hop of the route, normally the target itself.
    pub fn final_hop(&self) -> Option<&Hop> {
        self.hops.last()
    }
}
