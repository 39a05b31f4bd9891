//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod group;
pub mod user;

pub use group::{CreateGroupDto, GroupResponseDto, SubnetResponseDto, UpdateGroupRuleDto};
pub use user::{AddUserDto, MoveUserDto, UserResponseDto};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for group and user names
    static ref NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$").expect("valid regex");
}

/// Validates a group or user name
pub(crate) fn validate_name(name: &str) -> Result<(), validator::ValidationError> {
    if NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("name");
        error.message = Some(
            "Name must be 1-64 letters, digits, '_', '.' or '-', starting with a letter or digit".into(),
        );
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("office-1").is_ok());
        assert!(validate_name("a.b_c").is_ok());
        assert!(validate_name(&"x".repeat(64)).is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name("-office").is_err());
        assert!(validate_name("has space").is_err());
        assert!(validate_name(&"x".repeat(65)).is_err());
    }
}
