//! Restore Snapshot Use Case
//!
//! Replaces the whole registry with a previously exported snapshot.

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::snapshot::RegistrySnapshot;
use crate::shared::errors::UseCaseError;

/// Use case for restoring the registry from a snapshot
pub struct RestoreSnapshotUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl RestoreSnapshotUseCase {
    /// Create a new RestoreSnapshotUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found in the snapshot. The current
    /// registry state is left untouched in that case.
    pub fn execute(&self, snapshot: RegistrySnapshot) -> Result<(), UseCaseError> {
        let groups = snapshot.groups.len();
        tracing::info!(groups, "Restoring registry snapshot");

        self.group_registry
            .restore(snapshot)
            .inspect_err(|err| tracing::warn!(error = %err, "Snapshot rejected"))?;

        tracing::info!(groups, "Registry snapshot restored");
        Ok(())
    }
}
