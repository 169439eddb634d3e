// Target registry: the set of monitored addresses, in insertion order

use crate::error::TargetError;
use crate::models::MonitoredTarget;

#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<MonitoredTarget>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical form of an address as stored and looked up.
    pub fn normalize(address: &str) -> &str {
        address.trim()
    }

    /// Inserts a new target. A duplicate address leaves the registry untouched.
    pub fn add(
        &mut self,
        address: &str,
        label: Option<&str>,
    ) -> Result<MonitoredTarget, TargetError> {
        let address = Self::normalize(address);
        if address.is_empty() || address.chars().any(char::is_whitespace) {
            return Err(TargetError::InvalidAddress(address.to_string()));
        }
        if self.contains(address) {
            return Err(TargetError::AlreadyMonitored(address.to_string()));
        }
        let target = MonitoredTarget::new(address, label);
        self.targets.push(target.clone());
        Ok(target)
    }

    /// Removes a target and returns it. Callers are responsible for purging its data.
    pub fn remove(&mut self, address: &str) -> Result<MonitoredTarget, TargetError> {
        let address = Self::normalize(address);
        let pos = self
            .targets
            .iter()
            .position(|t| t.address == address)
            .ok_or_else(|| TargetError::NotMonitored(address.to_string()))?;
        Ok(self.targets.remove(pos))
    }

    pub fn get(&self, address: &str) -> Option<&MonitoredTarget> {
        self.targets.iter().find(|t| t.address == address)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.get(address).is_some()
    }

    /// All targets in insertion order.
    pub fn list(&self) -> &[MonitoredTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
