// Monitored target model

use serde::{Deserialize, Serialize};

/// A network address under monitoring. Identity is `address`; `label` is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredTarget {
    pub address: String,
    pub label: String,
}

impl MonitoredTarget {
    /// Builds a target, falling back to the address when no usable label is given.
    pub fn new(address: impl Into<String>, label: Option<&str>) -> Self {
        let address = address.into();
        let label = match label.map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => address.clone(),
        };
        Self { address, label }
    }
}
