// Model serialization tests (JSON camelCase)

use pingboard::dashboard::DashboardUpdate;
use pingboard::models::*;

#[test]
fn test_ping_sample_serialization_camel_case() {
    let sample = PingSample {
        address: "8.8.8.8".into(),
        latency_ms: 12.5,
        outcome: PingOutcome::Success,
        observed_at: 1000,
    };
    let json = serde_json::to_string(&sample).unwrap();
    assert!(json.contains("\"latencyMs\""));
    assert!(json.contains("\"observedAt\""));
    assert!(json.contains("\"success\""));
}

#[test]
fn test_chart_series_serialization_camel_case() {
    let series = ChartSeries {
        series_label: "Google DNS".into(),
        color: "hsl(1, 70%, 50%)".into(),
        x_labels: vec!["00:00:01".into()],
        y_values: vec![12.5],
    };
    let json = serde_json::to_string(&series).unwrap();
    assert!(json.contains("\"seriesLabel\""));
    assert!(json.contains("\"xLabels\""));
    assert!(json.contains("\"yValues\""));
}

#[test]
fn test_target_status_without_sample_has_null_latest() {
    let status = TargetStatus {
        address: "a".into(),
        label: "a".into(),
        latest: None,
    };
    let v = serde_json::to_value(&status).unwrap();
    assert!(v["latest"].is_null());
}

#[test]
fn test_monitored_target_label_defaults() {
    assert_eq!(MonitoredTarget::new("a", None).label, "a");
    assert_eq!(MonitoredTarget::new("a", Some(" A ")).label, "A");
}

#[test]
fn test_dashboard_update_is_tagged_by_type() {
    let update = DashboardUpdate::TargetRemoved {
        address: "8.8.8.8".into(),
    };
    let v = serde_json::to_value(&update).unwrap();
    assert_eq!(v["type"], "targetRemoved");
    assert_eq!(v["address"], "8.8.8.8");

    let update = DashboardUpdate::Route {
        snapshot: TracerouteSnapshot {
            address: "1.1.1.1".into(),
            hops: vec![Hop {
                index: 1,
                address: "10.0.0.1".into(),
                latency_ms: 2.0,
            }],
        },
    };
    let v = serde_json::to_value(&update).unwrap();
    assert_eq!(v["type"], "route");
    assert_eq!(v["snapshot"]["hops"][0]["latencyMs"], 2.0);
}
