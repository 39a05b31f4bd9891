//! Snapshot Use Cases
//!
//! Export and wholesale restore of the registry state.

mod export_snapshot;
mod restore_snapshot;

pub use export_snapshot::ExportSnapshotUseCase;
pub use restore_snapshot::RestoreSnapshotUseCase;
