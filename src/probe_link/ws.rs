// WebSocket bridge between the probing backend and an in-memory ProbeLink.
// No reconnect: when the socket ends, the inbound queue closes and the dashboard keeps its data.

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use super::{ProbeBackend, ProbeEvent, ProbeLink};

/// Dials the backend and spawns the bridge task. The returned handle finishes when
/// either the socket closes or the link's outbound side is dropped.
pub async fn connect(
    url: &str,
    outbound_capacity: usize,
    inbound_capacity: usize,
) -> anyhow::Result<(ProbeLink, JoinHandle<()>)> {
    let (socket, _response) = connect_async(url)
        .await
        .map_err(|e| anyhow::anyhow!("probe backend {}: {}", url, e))?;
    tracing::info!(url = %url, "Connected to probe backend");
    let (link, backend) = ProbeLink::channel(outbound_capacity, inbound_capacity);
    Ok((link, spawn_bridge(socket, backend)))
}

/// Like [`connect`], but an unreachable backend is not fatal: the returned link is
/// already closed on the backend side, so notifies fail and the inbound queue is empty.
pub async fn connect_or_detached(
    url: &str,
    outbound_capacity: usize,
    inbound_capacity: usize,
) -> (ProbeLink, Option<JoinHandle<()>>) {
    match connect(url, outbound_capacity, inbound_capacity).await {
        Ok((link, bridge)) => (link, Some(bridge)),
        Err(e) => {
            tracing::warn!(error = %e, "Probe backend unreachable, running without live telemetry");
            let (link, backend) = ProbeLink::channel(outbound_capacity, inbound_capacity);
            drop(backend);
            (link, None)
        }
    }
}

/// Pumps controls from `backend` into `socket` and telemetry frames from `socket` into `backend`.
pub fn spawn_bridge<S>(socket: S, backend: ProbeBackend) -> JoinHandle<()>
where
    S: Stream<Item = Result<Message, WsError>> + Sink<Message, Error = WsError> + Send + Unpin + 'static,
{
    tokio::spawn(run_bridge(socket, backend))
}

async fn run_bridge<S>(socket: S, backend: ProbeBackend)
where
    S: Stream<Item = Result<Message, WsError>> + Sink<Message, Error = WsError> + Send + Unpin + 'static,
{
    let ProbeBackend {
        mut controls,
        events,
    } = backend;
    let (mut sink, mut stream) = socket.split();
    let mut frames_received: u64 = 0;
    let mut frames_rejected: u64 = 0;

    loop {
        tokio::select! {
            control = controls.recv() => {
                let Some(control) = control else {
                    tracing::debug!("Probe link released, closing backend socket");
                    let _ = sink.close().await;
                    break;
                };
                let json = match serde_json::to_string(&control) {
                    Ok(j) => j,
                    Err(e) => {
                        tracing::warn!(error = %e, operation = "encode_control", "Dropping probe control");
                        continue;
                    }
                };
                if let Err(e) = sink.send(Message::Text(json)).await {
                    tracing::warn!(
                        error = %e,
                        address = %control.address(),
                        operation = "send_control",
                        "Failed to send probe control"
                    );
                    break;
                }
            }
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        frames_received += 1;
                        match serde_json::from_str::<ProbeEvent>(&text) {
                            Ok(event) => {
                                if events.send(event).await.is_err() {
                                    tracing::debug!("Dashboard dropped the inbound queue");
                                    break;
                                }
                            }
                            Err(e) => {
                                frames_rejected += 1;
                                tracing::warn!(error = %e, raw = %text, "Malformed probe frame");
                            }
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(?frame, "Probe backend closed the socket");
                        break;
                    }
                    // Ping/Pong are answered by tungstenite; binary frames are not part of the protocol.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Probe backend receive error");
                        break;
                    }
                    None => {
                        tracing::info!("Probe backend stream ended");
                        break;
                    }
                }
            }
        }
    }
    tracing::debug!(frames_received, frames_rejected, "Probe bridge shutting down");
}
