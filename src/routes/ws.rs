// WebSocket handler: initial snapshot, then every dashboard update.
// Ping and route frames are at-least-once relative to the snapshot: a sample applied while the
// snapshot is being taken shows up both as the snapshot's `latest` and as a `ping` frame.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use std::collections::HashSet;
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::dashboard::DashboardUpdate;
use crate::models::TargetStatus;
use crate::session::SessionClient;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Addresses the client already received in its snapshot. A `targetAdded` for one of them
/// was applied before the snapshot was read and is not forwarded again.
struct SnapshotFilter {
    listed: HashSet<String>,
}

impl SnapshotFilter {
    fn new(targets: &[TargetStatus]) -> Self {
        Self {
            listed: targets.iter().map(|t| t.address.clone()).collect(),
        }
    }

    fn is_replay(&mut self, update: &DashboardUpdate) -> bool {
        match update {
            DashboardUpdate::TargetAdded { target } => self.listed.contains(&target.address),
            DashboardUpdate::TargetRemoved { address } => {
                // A later re-add must reach the client.
                self.listed.remove(address);
                false
            }
            DashboardUpdate::Ping { .. } | DashboardUpdate::Route { .. } => false,
        }
    }
}

pub(super) async fn ws_dashboard(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let session = state.session.clone();
    ws.on_upgrade(move |socket| async move {
        // Subscribe before reading the snapshot so no update falls between the two.
        let mut rx = session.subscribe();
        if let Err(e) = stream_dashboard(socket, &mut rx, &session).await {
            tracing::info!("Dashboard stream error: {}", e);
        }
    })
}

async fn send_text(socket: &mut WebSocket, json: String) -> bool {
    let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
    matches!(r, Ok(Ok(())))
}

async fn stream_dashboard(
    mut socket: WebSocket,
    rx: &mut broadcast::Receiver<DashboardUpdate>,
    session: &SessionClient,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to dashboard stream");

    let targets = session.statuses().await?;
    let mut filter = SnapshotFilter::new(&targets);
    let welcome = serde_json::json!({ "type": "snapshot", "targets": targets });
    if !send_text(&mut socket, serde_json::to_string(&welcome)?).await {
        return Ok(());
    }

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // First tick completes immediately; the welcome frame already proved the socket alive.
    ping_interval.tick().await;
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(update) => {
                        if filter.is_replay(&update) {
                            continue;
                        }
                        if !send_text(&mut socket, serde_json::to_string(&update)?).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws/dashboard client lagged, skipped {} updates", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    tracing::info!("Client disconnected from dashboard stream");
    Ok(())
}
