//! Export Snapshot Use Case

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::snapshot::RegistrySnapshot;

/// Use case for taking a consistent copy of the registry
pub struct ExportSnapshotUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl ExportSnapshotUseCase {
    /// Create a new ExportSnapshotUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    #[must_use]
    pub fn execute(&self) -> RegistrySnapshot {
        let snapshot = self.group_registry.snapshot();
        tracing::info!(groups = snapshot.groups.len(), "Registry snapshot exported");
        snapshot
    }
}
