// Connection to the probing backend: outbound controls and inbound telemetry.
// The dashboard only ever sees the in-memory ends; `ws` bridges them to a socket.

mod message;
pub mod ws;

pub use message::{
    ControlMessage, HopPayload, PingResultPayload, ProbeEvent, TracerouteResultPayload,
};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

pub const DEFAULT_OUTBOUND_CAPACITY: usize = 64;
pub const DEFAULT_INBOUND_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("probe link outbound queue is full")]
    Full,
    #[error("probe link is closed")]
    Closed,
}

/// Fire-and-forget sender of probe controls.
#[derive(Debug, Clone)]
pub struct ProbeOutbound {
    tx: mpsc::Sender<ControlMessage>,
}

impl ProbeOutbound {
    /// Queues a control without waiting. Never blocks the caller.
    pub fn notify(&self, msg: ControlMessage) -> Result<(), LinkError> {
        self.tx.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) => LinkError::Full,
            TrySendError::Closed(_) => LinkError::Closed,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Dashboard-side end of the link.
#[derive(Debug)]
pub struct ProbeLink {
    pub outbound: ProbeOutbound,
    pub inbound: mpsc::Receiver<ProbeEvent>,
}

/// Backend-side end of the link: receives controls, pushes telemetry.
#[derive(Debug)]
pub struct ProbeBackend {
    pub controls: mpsc::Receiver<ControlMessage>,
    pub events: mpsc::Sender<ProbeEvent>,
}

impl ProbeLink {
    /// In-memory link pair. Capacities are clamped to at least 1.
    pub fn channel(outbound_capacity: usize, inbound_capacity: usize) -> (ProbeLink, ProbeBackend) {
        let (control_tx, control_rx) = mpsc::channel(outbound_capacity.max(1));
        let (event_tx, event_rx) = mpsc::channel(inbound_capacity.max(1));
        (
            ProbeLink {
                outbound: ProbeOutbound { tx: control_tx },
                inbound: event_rx,
            },
            ProbeBackend {
                controls: control_rx,
                events: event_tx,
            },
        )
    }
}
