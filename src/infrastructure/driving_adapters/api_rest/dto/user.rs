//! User DTOs
//!
//! Data transfer objects for user API endpoints.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_name;
use crate::domain::models::user::{AddUserData, MoveUserData, User};

/// Validates a requested address; an empty string asks for auto-assignment
fn validate_address(address: &str) -> Result<(), validator::ValidationError> {
    if address.trim().is_empty() || address.trim().parse::<Ipv4Addr>().is_ok() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("address");
        error.message = Some("Address must be a dotted-decimal IPv4 address".into());
        Err(error)
    }
}

/// Only meaningful after `validate_address` has accepted the value
fn requested_address(address: &str) -> Option<Ipv4Addr> {
    address.trim().parse().ok()
}

/// DTO for adding a user to a group
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddUserDto {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_name"))]
    pub group: String,

    #[serde(default)]
    #[validate(custom(function = "validate_address"))]
    pub address: String,
}

impl From<AddUserDto> for AddUserData {
    fn from(dto: AddUserDto) -> Self {
        Self {
            address: requested_address(&dto.address),
            name: dto.name,
            group: dto.group,
        }
    }
}

/// DTO for moving a user (PUT /users/{name})
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveUserDto {
    #[validate(custom(function = "validate_name"))]
    pub group: String,

    #[serde(default)]
    #[validate(custom(function = "validate_address"))]
    pub address: String,
}

impl From<MoveUserDto> for MoveUserData {
    fn from(dto: MoveUserDto) -> Self {
        Self {
            address: requested_address(&dto.address),
            group: dto.group,
        }
    }
}

/// Response DTO for user data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub name: String,
    pub address: Option<String>,
    pub group_name: Option<String>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            name: user.name().to_string(),
            address: user.address().map(|a| a.to_string()),
            group_name: user.group_name().map(str::to_string),
        }
    }
}
