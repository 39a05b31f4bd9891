//! Error Types
//!
//! Domain-specific error types with proper HTTP status code mapping.

use std::net::Ipv4Addr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Domain-level errors representing address management rule violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Group '{0}' already exists")]
    GroupAlreadyExists(String),

    #[error("Group '{0}' not found")]
    GroupNotFound(String),

    #[error("Group '{name}' still has {users} user(s)")]
    GroupNonEmpty { name: String, users: usize },

    #[error("Rule '{rule}' overlaps the address space of group '{group}'")]
    RuleConflict { rule: String, group: String },

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Rule change would orphan allocated address {0}")]
    RuleWouldOrphanAddress(Ipv4Addr),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("User '{user}' is already in group '{group}'")]
    UserAlreadyInGroup { user: String, group: String },

    #[error("No address available")]
    NoAddressAvailable,

    #[error("Address {0} cannot be assigned")]
    InvalidAddressRequest(Ipv4Addr),

    #[error("Address {0} is not allocated")]
    AddressNotAllocated(Ipv4Addr),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Domain(
                DomainError::InvalidRule(_)
                | DomainError::InvalidAddressRequest(_)
                | DomainError::InvalidSnapshot(_),
            ) => StatusCode::BAD_REQUEST,
            Self::Domain(DomainError::GroupNotFound(_) | DomainError::UserNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Domain(_) => StatusCode::CONFLICT,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Domain(err) => match err {
                DomainError::GroupAlreadyExists(_) => "GROUP_ALREADY_EXISTS",
                DomainError::GroupNotFound(_) => "GROUP_NOT_FOUND",
                DomainError::GroupNonEmpty { .. } => "GROUP_NON_EMPTY",
                DomainError::RuleConflict { .. } => "RULE_CONFLICT",
                DomainError::InvalidRule(_) => "INVALID_RULE",
                DomainError::RuleWouldOrphanAddress(_) => "RULE_WOULD_ORPHAN_ADDRESS",
                DomainError::UserAlreadyExists(_) => "USER_ALREADY_EXISTS",
                DomainError::UserNotFound(_) => "USER_NOT_FOUND",
                DomainError::UserAlreadyInGroup { .. } => "USER_ALREADY_IN_GROUP",
                DomainError::NoAddressAvailable => "NO_ADDRESS_AVAILABLE",
                DomainError::InvalidAddressRequest(_) => "INVALID_ADDRESS_REQUEST",
                DomainError::AddressNotAllocated(_) => "ADDRESS_NOT_ALLOCATED",
                DomainError::InvalidSnapshot(_) => "INVALID_SNAPSHOT",
            },
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::UseCase(uc_error) => {
                let details = if let UseCaseError::Validation(errors) = uc_error {
                    Some(
                        errors
                            .iter()
                            .map(|e| FieldError {
                                field: String::new(),
                                message: e.clone(),
                            })
                            .collect(),
                    )
                } else {
                    None
                };
                (uc_error.status_code(), uc_error.error_code().to_string(), uc_error.to_string(), details)
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST".to_string(), msg.clone(), None)
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR".to_string(),
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code,
                message,
                details,
            },
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::UseCase(UseCaseError::Domain(err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map_or("invalid", |m| m.as_ref())
                    )
                })
            })
            .collect();
        ApiError::UseCase(UseCaseError::Validation(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds_map_to_404() {
        let err = UseCaseError::from(DomainError::GroupNotFound("g1".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "GROUP_NOT_FOUND");

        let err = UseCaseError::from(DomainError::UserNotFound("u1".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_input_kinds_map_to_400() {
        let err = UseCaseError::from(DomainError::InvalidRule("nope".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = UseCaseError::from(DomainError::InvalidAddressRequest(Ipv4Addr::new(10, 0, 0, 0)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_ADDRESS_REQUEST");
    }

    #[test]
    fn test_state_conflicts_map_to_409() {
        let err = UseCaseError::from(DomainError::GroupNonEmpty {
            name: "g1".to_string(),
            users: 2,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Group 'g1' still has 2 user(s)");

        let err = UseCaseError::from(DomainError::NoAddressAvailable);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
