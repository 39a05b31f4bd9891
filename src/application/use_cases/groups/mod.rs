//! Group Use Cases
//!
//! Business logic for managing groups and their address rules.

mod create_group;
mod delete_group;
mod get_group;
mod list_groups;
mod update_group_rule;

pub use create_group::CreateGroupUseCase;
pub use delete_group::DeleteGroupUseCase;
pub use get_group::GetGroupUseCase;
pub use list_groups::ListGroupsUseCase;
pub use update_group_rule::UpdateGroupRuleUseCase;
