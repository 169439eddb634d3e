// Wire messages exchanged with the probing backend.
// Frames are JSON text: {"event": "<name>", "data": <payload>}.

use serde::{Deserialize, Serialize};

use crate::models::{Hop, PingOutcome, PingSample, TracerouteSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResultPayload {
    pub ip: String,
    pub latency: f64,
    pub status: PingOutcome,
    /// Epoch millis.
    pub timestamp: u64,
}

impl PingResultPayload {
    pub fn into_sample(self) -> PingSample {
        PingSample {
            address: self.ip,
            latency_ms: self.latency,
            outcome: self.status,
            observed_at: self.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopPayload {
    pub hop: u32,
    pub address: String,
    pub latency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracerouteResultPayload {
    pub ip: String,
    pub hops: Vec<HopPayload>,
}

impl TracerouteResultPayload {
    pub fn into_snapshot(self) -> TracerouteSnapshot {
        TracerouteSnapshot {
            address: self.ip,
            hops: self
                .hops
                .into_iter()
                .map(|h| Hop {
                    index: h.hop,
                    address: h.address,
                    latency_ms: h.latency,
                })
                .collect(),
        }
    }
}

/// Inbound telemetry pushed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ProbeEvent {
    #[serde(rename = "pingResult")]
    PingResult(PingResultPayload),
    #[serde(rename = "tracerouteResult")]
    TracerouteResult(TracerouteResultPayload),
}

impl ProbeEvent {
    /// Address the event refers to.
    pub fn address(&self) -> &str {
        match self {
            ProbeEvent::PingResult(p) => &p.ip,
            ProbeEvent::TracerouteResult(t) => &t.ip,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProbeEvent::PingResult(_) => "pingResult",
            ProbeEvent::TracerouteResult(_) => "tracerouteResult",
        }
    }
}

/// Outbound probe control, payload is the bare address string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ControlMessage {
    #[serde(rename = "addIP")]
    AddIp(String),
    #[serde(rename = "removeIP")]
    RemoveIp(String),
}

impl ControlMessage {
    pub fn address(&self) -> &str {
        match self {
            ControlMessage::AddIp(a) | ControlMessage::RemoveIp(a) => a,
        }
    }
}
