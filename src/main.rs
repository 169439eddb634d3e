use anyhow::Result;
use pingboard::*;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(name = NAME, version = VERSION, "Starting");

    let (link, bridge_handle) = probe_link::ws::connect_or_detached(
        &app_config.probe.url,
        app_config.probe.outbound_capacity,
        app_config.probe.inbound_capacity,
    )
    .await;
    let probe_link::ProbeLink { outbound, inbound } = link;

    let (updates_tx, _) =
        broadcast::channel::<dashboard::DashboardUpdate>(app_config.publishing.broadcast_capacity);
    let mut board =
        dashboard::Dashboard::new(outbound, app_config.history.retention(), updates_tx);
    for seed in &app_config.targets {
        if let Err(e) = board.add_target(&seed.address, seed.label.as_deref()) {
            tracing::warn!(error = %e, address = %seed.address, "Skipping configured target");
        }
    }

    let session = session::spawn(
        board,
        inbound,
        session::SessionConfig {
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
            ..Default::default()
        },
    );

    let app = routes::app(session.client());
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Received shutdown signal");
    // Releasing the dashboard drops the probe link, which closes the backend socket.
    if let Some(board) = session.shutdown().await {
        let stats = board.stats();
        tracing::info!(
            targets = stats.targets,
            samples = stats.samples,
            "Dashboard session closed"
        );
    }
    if let Some(bridge) = bridge_handle {
        let _ = bridge.await;
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
