// Dashboard session: one task owns the Dashboard and applies user commands and probe events
// strictly one at a time, in the order each queue delivers them.

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;
use tokio::time::{Duration, interval};

use crate::dashboard::{Dashboard, DashboardStats, DashboardUpdate};
use crate::error::TargetError;
use crate::models::{ChartSeries, MonitoredTarget, TargetStatus, TracerouteSnapshot};
use crate::probe_link::ProbeEvent;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Target(#[from] TargetError),
    #[error("dashboard session is closed")]
    Closed,
}

pub struct SessionConfig {
    pub command_capacity: usize,
    /// How often to log dashboard stats at INFO level.
    pub stats_log_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command_capacity: 64,
            stats_log_interval_secs: 60,
        }
    }
}

type Reply<T> = oneshot::Sender<T>;

enum Command {
    AddTarget {
        address: String,
        label: Option<String>,
        reply: Reply<Result<MonitoredTarget, TargetError>>,
    },
    RemoveTarget {
        address: String,
        reply: Reply<Result<MonitoredTarget, TargetError>>,
    },
    Statuses {
        reply: Reply<Vec<TargetStatus>>,
    },
    Status {
        address: String,
        reply: Reply<Option<TargetStatus>>,
    },
    Series {
        address: String,
        reply: Reply<Option<ChartSeries>>,
    },
    Route {
        address: String,
        reply: Reply<Option<Option<TracerouteSnapshot>>>,
    },
    Stats {
        reply: Reply<DashboardStats>,
    },
}

/// Cloneable front door to a running session.
#[derive(Clone)]
pub struct SessionClient {
    commands: mpsc::Sender<Command>,
    updates: broadcast::Sender<DashboardUpdate>,
}

impl SessionClient {
    pub async fn add_target(
        &self,
        address: &str,
        label: Option<&str>,
    ) -> Result<MonitoredTarget, SessionError> {
        let result = self
            .request(|reply| Command::AddTarget {
                address: address.to_string(),
                label: label.map(str::to_string),
                reply,
            })
            .await?;
        Ok(result?)
    }

    pub async fn remove_target(&self, address: &str) -> Result<MonitoredTarget, SessionError> {
        let result = self
            .request(|reply| Command::RemoveTarget {
                address: address.to_string(),
                reply,
            })
            .await?;
        Ok(result?)
    }

    pub async fn statuses(&self) -> Result<Vec<TargetStatus>, SessionError> {
        self.request(|reply| Command::Statuses { reply }).await
    }

    pub async fn status(&self, address: &str) -> Result<Option<TargetStatus>, SessionError> {
        self.request(|reply| Command::Status {
            address: address.to_string(),
            reply,
        })
        .await
    }

    pub async fn series(&self, address: &str) -> Result<Option<ChartSeries>, SessionError> {
        self.request(|reply| Command::Series {
            address: address.to_string(),
            reply,
        })
        .await
    }

    /// Outer `None`: not monitored. Inner `None`: monitored, no traceroute yet.
    pub async fn route(
        &self,
        address: &str,
    ) -> Result<Option<Option<TracerouteSnapshot>>, SessionError> {
        self.request(|reply| Command::Route {
            address: address.to_string(),
            reply,
        })
        .await
    }

    pub async fn stats(&self) -> Result<DashboardStats, SessionError> {
        self.request(|reply| Command::Stats { reply }).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardUpdate> {
        self.updates.subscribe()
    }

    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Command) -> Result<T, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }
}

/// Owns a running session. Dropping it signals shutdown; `shutdown` also waits for the task.
pub struct SessionHandle {
    client: SessionClient,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Dashboard>>,
}

impl SessionHandle {
    pub fn client(&self) -> SessionClient {
        self.client.clone()
    }

    /// Stops the loop and hands back the final dashboard state.
    pub async fn shutdown(mut self) -> Option<Dashboard> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let task = self.task.take()?;
        match task.await {
            Ok(dashboard) => Some(dashboard),
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard session task failed");
                None
            }
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Moves `dashboard` into a new task that drains `inbound` and serves client commands.
pub fn spawn(
    dashboard: Dashboard,
    inbound: mpsc::Receiver<ProbeEvent>,
    config: SessionConfig,
) -> SessionHandle {
    let updates = dashboard.updates_sender();
    let (command_tx, command_rx) = mpsc::channel(config.command_capacity.max(1));
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(
        run(
            dashboard,
            inbound,
            command_rx,
            shutdown_rx,
            Duration::from_secs(config.stats_log_interval_secs.max(1)),
        )
        .instrument(tracing::debug_span!("session")),
    );
    SessionHandle {
        client: SessionClient {
            commands: command_tx,
            updates,
        },
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    }
}

async fn run(
    mut dashboard: Dashboard,
    mut inbound: mpsc::Receiver<ProbeEvent>,
    mut commands: mpsc::Receiver<Command>,
    mut shutdown_rx: oneshot::Receiver<()>,
    stats_log_interval: Duration,
) -> Dashboard {
    let mut stats_log_tick = interval(stats_log_interval);
    stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut inbound_open = true;

    loop {
        tokio::select! {
            event = inbound.recv(), if inbound_open => {
                match event {
                    Some(event) => {
                        dashboard.handle_event(event);
                    }
                    None => {
                        tracing::warn!("Probe channel closed; serving existing data only");
                        inbound_open = false;
                    }
                }
            }
            command = commands.recv() => {
                match command {
                    Some(command) => apply(&mut dashboard, command),
                    // Every client is gone; nobody can reach this session any more.
                    None => break,
                }
            }
            _ = &mut shutdown_rx => {
                tracing::debug!("Dashboard session shutting down");
                break;
            }
            _ = stats_log_tick.tick() => {
                let stats = dashboard.stats();
                tracing::info!(
                    targets = stats.targets,
                    samples = stats.samples,
                    routes = stats.routes,
                    orphans_discarded = stats.orphans_discarded,
                    notify_failures = stats.notify_failures,
                    probe_channel_open = inbound_open,
                    "dashboard stats"
                );
            }
        }
    }
    dashboard
}

fn apply(dashboard: &mut Dashboard, command: Command) {
    // A dropped reply receiver only means the caller stopped waiting.
    match command {
        Command::AddTarget {
            address,
            label,
            reply,
        } => {
            let _ = reply.send(dashboard.add_target(&address, label.as_deref()));
        }
        Command::RemoveTarget { address, reply } => {
            let _ = reply.send(dashboard.remove_target(&address));
        }
        Command::Statuses { reply } => {
            let _ = reply.send(dashboard.statuses());
        }
        Command::Status { address, reply } => {
            let _ = reply.send(dashboard.current_status(&address));
        }
        Command::Series { address, reply } => {
            let _ = reply.send(dashboard.series(&address));
        }
        Command::Route { address, reply } => {
            let route = dashboard
                .is_monitored(&address)
                .then(|| dashboard.current_route(&address).cloned());
            let _ = reply.send(route);
        }
        Command::Stats { reply } => {
            let _ = reply.send(dashboard.stats());
        }
    }
}
