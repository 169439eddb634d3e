// Latest traceroute per target. No route history is kept.

use crate::models::TracerouteSnapshot;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RouteRepo {
    snapshots: HashMap<String, TracerouteSnapshot>,
}

impl RouteRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any prior snapshot for the same address, returning it.
    pub fn set(&mut self, snapshot: TracerouteSnapshot) -> Option<TracerouteSnapshot> {
        self.snapshots.insert(snapshot.address.clone(), snapshot)
    }

    pub fn get(&self, address: &str) -> Option<&TracerouteSnapshot> {
        self.snapshots.get(address)
    }

    pub fn purge(&mut self, address: &str) -> bool {
        self.snapshots.remove(address).is_some()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
