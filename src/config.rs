use serde::Deserialize;

use crate::history_repo::{DEFAULT_MAX_SAMPLES, RetentionPolicy};
use crate::probe_link::{DEFAULT_INBOUND_CAPACITY, DEFAULT_OUTBOUND_CAPACITY};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub probe: ProbeConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    pub publishing: PublishingConfig,
    pub monitoring: MonitoringConfig,
    /// Targets registered at startup, in order.
    #[serde(default)]
    pub targets: Vec<SeedTarget>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// WebSocket URL of the probing backend.
    pub url: String,
    #[serde(default = "default_outbound_capacity")]
    pub outbound_capacity: usize,
    #[serde(default = "default_inbound_capacity")]
    pub inbound_capacity: usize,
}

fn default_outbound_capacity() -> usize {
    DEFAULT_OUTBOUND_CAPACITY
}

fn default_inbound_capacity() -> usize {
    DEFAULT_INBOUND_CAPACITY
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_max_samples_per_target")]
    pub max_samples_per_target: usize,
    /// Optional sliding window; samples older than this (relative to the newest) are dropped.
    #[serde(default)]
    pub max_age_secs: Option<u64>,
}

fn default_max_samples_per_target() -> usize {
    DEFAULT_MAX_SAMPLES
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_samples_per_target: DEFAULT_MAX_SAMPLES,
            max_age_secs: None,
        }
    }
}

impl HistoryConfig {
    pub fn retention(&self) -> RetentionPolicy {
        let policy = RetentionPolicy::with_max_samples(self.max_samples_per_target);
        match self.max_age_secs {
            Some(secs) => policy.with_max_age_ms(secs.saturating_mul(1000)),
            None => policy,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// Max number of dashboard updates buffered for /ws/dashboard (slow clients may lag).
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log dashboard stats at INFO level.
    pub stats_log_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedTarget {
    pub address: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("config file {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.probe.url.starts_with("ws://") || self.probe.url.starts_with("wss://"),
            "probe.url must be a ws:// or wss:// URL, got {:?}",
            self.probe.url
        );
        anyhow::ensure!(
            self.probe.outbound_capacity > 0,
            "probe.outbound_capacity must be > 0, got {}",
            self.probe.outbound_capacity
        );
        anyhow::ensure!(
            self.probe.inbound_capacity > 0,
            "probe.inbound_capacity must be > 0, got {}",
            self.probe.inbound_capacity
        );
        anyhow::ensure!(
            self.history.max_samples_per_target > 0,
            "history.max_samples_per_target must be > 0, got {}",
            self.history.max_samples_per_target
        );
        if let Some(secs) = self.history.max_age_secs {
            anyhow::ensure!(secs > 0, "history.max_age_secs must be > 0, got {}", secs);
        }
        anyhow::ensure!(
            self.publishing.broadcast_capacity > 0,
            "publishing.broadcast_capacity must be > 0, got {}",
            self.publishing.broadcast_capacity
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        for (i, t) in self.targets.iter().enumerate() {
            anyhow::ensure!(
                !t.address.trim().is_empty(),
                "targets[{}].address must be non-empty",
                i
            );
        }
        Ok(())
    }
}
