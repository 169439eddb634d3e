// Latency history: arrival order, latest, purge, retention

use pingboard::history_repo::{LatencyHistoryRepo, RetentionPolicy};
use pingboard::models::{PingOutcome, PingSample};

fn sample(address: &str, latency_ms: f64, observed_at: u64) -> PingSample {
    PingSample {
        address: address.into(),
        latency_ms,
        outcome: PingOutcome::Success,
        observed_at,
    }
}

#[test]
fn empty_history_reports_absence() {
    let repo = LatencyHistoryRepo::default();
    assert_eq!(repo.all_for("x").len(), 0);
    assert!(repo.latest_for("x").is_none());
    assert_eq!(repo.len_for("x"), 0);
}

#[test]
fn append_preserves_arrival_order_regardless_of_timestamps() {
    let mut repo = LatencyHistoryRepo::default();
    let samples = vec![
        sample("a", 1.0, 3000),
        sample("a", 2.0, 1000),
        sample("a", 3.0, 2000),
    ];
    for s in &samples {
        repo.append(s.clone());
    }
    let stored: Vec<PingSample> = repo.all_for("a").cloned().collect();
    assert_eq!(stored, samples);
    assert_eq!(repo.latest_for("a").unwrap().latency_ms, 3.0);
}

#[test]
fn histories_are_kept_per_address() {
    let mut repo = LatencyHistoryRepo::default();
    repo.append(sample("a", 1.0, 1));
    repo.append(sample("b", 2.0, 2));
    repo.append(sample("a", 3.0, 3));
    assert_eq!(repo.len_for("a"), 2);
    assert_eq!(repo.len_for("b"), 1);
    assert_eq!(repo.target_count(), 2);
    assert_eq!(repo.total_samples(), 3);
}

#[test]
fn purge_drops_everything_for_one_address() {
    let mut repo = LatencyHistoryRepo::default();
    repo.append(sample("a", 1.0, 1));
    repo.append(sample("a", 2.0, 2));
    repo.append(sample("b", 3.0, 3));
    assert_eq!(repo.purge("a"), 2);
    assert_eq!(repo.all_for("a").len(), 0);
    assert!(repo.latest_for("a").is_none());
    assert_eq!(repo.len_for("b"), 1);
    assert_eq!(repo.purge("a"), 0);
}

#[test]
fn max_samples_evicts_oldest_arrivals() {
    let mut repo = LatencyHistoryRepo::new(RetentionPolicy::with_max_samples(3));
    let mut evicted = 0;
    for i in 0..5u64 {
        evicted += repo.append(sample("a", i as f64, i * 1000));
    }
    assert_eq!(evicted, 2);
    let kept: Vec<f64> = repo.all_for("a").map(|s| s.latency_ms).collect();
    assert_eq!(kept, vec![2.0, 3.0, 4.0]);
}

#[test]
fn zero_max_samples_is_clamped_to_one() {
    let mut repo = LatencyHistoryRepo::new(RetentionPolicy::with_max_samples(0));
    repo.append(sample("a", 1.0, 1));
    repo.append(sample("a", 2.0, 2));
    assert_eq!(repo.len_for("a"), 1);
    assert_eq!(repo.latest_for("a").unwrap().latency_ms, 2.0);
}

#[test]
fn max_age_evicts_samples_outside_window() {
    let policy = RetentionPolicy::with_max_samples(100).with_max_age_ms(10_000);
    let mut repo = LatencyHistoryRepo::new(policy);
    repo.append(sample("a", 1.0, 0));
    repo.append(sample("a", 2.0, 5_000));
    repo.append(sample("a", 3.0, 12_000));
    let kept: Vec<u64> = repo.all_for("a").map(|s| s.observed_at).collect();
    assert_eq!(kept, vec![5_000, 12_000]);
}

#[test]
fn max_age_only_trims_from_the_front() {
    let policy = RetentionPolicy::with_max_samples(100).with_max_age_ms(1_000);
    let mut repo = LatencyHistoryRepo::new(policy);
    repo.append(sample("a", 1.0, 5_000));
    // Late, out-of-order arrival stays behind a younger head.
    repo.append(sample("a", 2.0, 100));
    repo.append(sample("a", 3.0, 5_500));
    let kept: Vec<f64> = repo.all_for("a").map(|s| s.latency_ms).collect();
    assert_eq!(kept, vec![1.0, 2.0, 3.0]);
}
