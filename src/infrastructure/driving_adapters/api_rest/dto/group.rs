//! Group DTOs
//!
//! Data transfer objects for group API endpoints.

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserResponseDto;
use super::validate_name;
use crate::domain::models::group::{CreateGroupData, GroupSummary, SubnetSummary};

/// Validates that every comma-separated entry of a rule is an IPv4 CIDR
fn validate_rule(rule: &str) -> Result<(), validator::ValidationError> {
    for entry in rule.split(',') {
        if entry.trim().parse::<Ipv4Net>().is_err() {
            let mut error = validator::ValidationError::new("rule");
            error.message = Some(format!("'{}' is not an IPv4 CIDR block", entry.trim()).into());
            return Err(error);
        }
    }
    Ok(())
}

/// DTO for creating a new group
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupDto {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(length(min = 1, max = 4096, message = "rule must be between 1 and 4096 characters"))]
    #[validate(custom(function = "validate_rule"))]
    pub rule: String,
}

impl From<CreateGroupDto> for CreateGroupData {
    fn from(dto: CreateGroupDto) -> Self {
        Self {
            name: dto.name,
            rule: dto.rule,
        }
    }
}

/// DTO for replacing the rule of a group (PUT /groups/{name}/rule)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRuleDto {
    #[validate(length(min = 1, max = 4096, message = "rule must be between 1 and 4096 characters"))]
    #[validate(custom(function = "validate_rule"))]
    pub rule: String,
}

/// Response DTO for one subnet of a group
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetResponseDto {
    pub rule: String,
    pub capacity: i64,
    pub in_use: Vec<String>,
}

impl From<SubnetSummary> for SubnetResponseDto {
    fn from(subnet: SubnetSummary) -> Self {
        Self {
            rule: subnet.rule,
            capacity: subnet.capacity,
            in_use: subnet.in_use.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Response DTO for group data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponseDto {
    pub name: String,
    pub rule: String,
    pub total_capacity: i64,
    pub allocated: usize,
    pub subnets: Vec<SubnetResponseDto>,
    pub users: Vec<UserResponseDto>,
}

impl From<GroupSummary> for GroupResponseDto {
    fn from(group: GroupSummary) -> Self {
        Self {
            name: group.name,
            rule: group.rule,
            total_capacity: group.total_capacity,
            allocated: group.allocated,
            subnets: group.subnets.into_iter().map(SubnetResponseDto::from).collect(),
            users: group.users.into_iter().map(UserResponseDto::from).collect(),
        }
    }
}
