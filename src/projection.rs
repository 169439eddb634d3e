// Chart projections derived from latency history on every read. Holds no state.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

use crate::history_repo::LatencyHistoryRepo;
use crate::models::ChartSeries;

const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";
const UNKNOWN_TIME: &str = "--:--:--";

/// Builds the latency series for `address` with time-of-day labels in local time.
pub fn project(history: &LatencyHistoryRepo, address: &str, label: Option<&str>) -> ChartSeries {
    project_in(history, address, label, &Local)
}

/// Same as [`project`] but formats labels in the given time zone.
pub fn project_in<Tz>(
    history: &LatencyHistoryRepo,
    address: &str,
    label: Option<&str>,
    tz: &Tz,
) -> ChartSeries
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let samples = history.all_for(address);
    let mut x_labels = Vec::with_capacity(samples.len());
    let mut y_values = Vec::with_capacity(samples.len());
    for sample in samples {
        x_labels.push(format_time_of_day(sample.observed_at, tz));
        y_values.push(sample.latency_ms);
    }

    let series_label = match label {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => address.to_string(),
    };

    ChartSeries {
        series_label,
        color: series_color(address),
        x_labels,
        y_values,
    }
}

/// Formats epoch millis as `HH:MM:SS` in `tz`.
pub fn format_time_of_day<Tz>(epoch_ms: u64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|utc| utc.with_timezone(tz).format(TIME_OF_DAY_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Stable per-address colour: FNV-1a hash of the address mapped onto the hue wheel.
pub fn series_color(address: &str) -> String {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in address.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    format!("hsl({}, 70%, 50%)", hash % 360)
}
