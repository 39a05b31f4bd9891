//! User Use Cases
//!
//! Business logic for admitting, moving and removing users.

mod add_user;
mod get_user;
mod move_user;
mod remove_user;

pub use add_user::AddUserUseCase;
pub use get_user::GetUserUseCase;
pub use move_user::MoveUserUseCase;
pub use remove_user::RemoveUserUseCase;
