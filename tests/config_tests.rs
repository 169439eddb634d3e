// Config loading and validation tests

use pingboard::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8090
host = "0.0.0.0"

[probe]
url = "ws://127.0.0.1:3000/probe"

[history]
max_samples_per_target = 120

[publishing]
broadcast_capacity = 256

[monitoring]
stats_log_interval_secs = 60

[[targets]]
address = "8.8.8.8"
label = "Google DNS"

[[targets]]
address = "1.1.1.1"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8090);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.probe.url, "ws://127.0.0.1:3000/probe");
    assert_eq!(config.history.max_samples_per_target, 120);
    assert_eq!(config.publishing.broadcast_capacity, 256);
    assert_eq!(config.monitoring.stats_log_interval_secs, 60);
    assert_eq!(config.targets.len(), 2);
    assert_eq!(config.targets[0].label.as_deref(), Some("Google DNS"));
    assert!(config.targets[1].label.is_none());
}

#[test]
fn test_config_probe_capacities_default() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("valid");
    assert_eq!(config.probe.outbound_capacity, 64);
    assert_eq!(config.probe.inbound_capacity, 1024);
}

#[test]
fn test_config_history_section_optional() {
    let without = VALID_CONFIG.replace("[history]\nmax_samples_per_target = 120\n", "");
    let config = AppConfig::load_from_str(&without).expect("valid");
    assert_eq!(config.history.max_samples_per_target, 300);
    assert!(config.history.max_age_secs.is_none());
}

#[test]
fn test_config_retention_from_history_section() {
    let with_age = VALID_CONFIG.replace(
        "max_samples_per_target = 120",
        "max_samples_per_target = 120\nmax_age_secs = 600",
    );
    let config = AppConfig::load_from_str(&with_age).expect("valid");
    let retention = config.history.retention();
    assert_eq!(retention.max_samples, 120);
    assert_eq!(retention.max_age_ms, Some(600_000));
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8090", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_non_ws_url() {
    let bad = VALID_CONFIG.replace("ws://127.0.0.1:3000/probe", "http://127.0.0.1:3000");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("probe.url"));
}

#[test]
fn test_config_validation_rejects_inbound_capacity_zero() {
    let bad = VALID_CONFIG.replace(
        "url = \"ws://127.0.0.1:3000/probe\"",
        "url = \"ws://127.0.0.1:3000/probe\"\ninbound_capacity = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("inbound_capacity"));
}

#[test]
fn test_config_validation_rejects_max_samples_zero() {
    let bad = VALID_CONFIG.replace("max_samples_per_target = 120", "max_samples_per_target = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_samples_per_target"));
}

#[test]
fn test_config_validation_rejects_max_age_zero() {
    let bad = VALID_CONFIG.replace(
        "max_samples_per_target = 120",
        "max_samples_per_target = 120\nmax_age_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_age_secs"));
}

#[test]
fn test_config_validation_rejects_broadcast_capacity_zero() {
    let bad = VALID_CONFIG.replace("broadcast_capacity = 256", "broadcast_capacity = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("broadcast_capacity"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 60",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_empty_seed_address() {
    let bad = VALID_CONFIG.replace("address = \"1.1.1.1\"", "address = \" \"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("targets[1].address"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8090);
    assert_eq!(config.targets[0].address, "8.8.8.8");
}
