// Read-side views handed to the presentation layer

use serde::{Deserialize, Serialize};

use super::PingSample;

/// Chart-ready latency series for one target. `x_labels` and `y_values` are index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub series_label: String,
    /// CSS colour, stable per address.
    pub color: String,
    pub x_labels: Vec<String>,
    pub y_values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.y_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_values.is_empty()
    }
}

/// Summary row for one registered target: its label and most recent ping, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetStatus {
    pub address: String,
    pub label: String,
    pub latest: Option<PingSample>,
}
