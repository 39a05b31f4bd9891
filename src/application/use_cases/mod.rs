//! Use Cases
//!
//! Application-specific business rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod groups;
pub mod snapshots;
pub mod users;

pub use groups::{
    CreateGroupUseCase, DeleteGroupUseCase, GetGroupUseCase, ListGroupsUseCase,
    UpdateGroupRuleUseCase,
};
pub use snapshots::{ExportSnapshotUseCase, RestoreSnapshotUseCase};
pub use users::{AddUserUseCase, GetUserUseCase, MoveUserUseCase, RemoveUserUseCase};
