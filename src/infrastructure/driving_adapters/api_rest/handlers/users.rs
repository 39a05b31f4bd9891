//! User Handlers
//!
//! HTTP handlers for adding, moving and removing users.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::infrastructure::driving_adapters::api_rest::dto::user::{
    AddUserDto, MoveUserDto, UserResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for user endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_user))
        .route("/{name}", get(get_user).put(move_user).delete(remove_user))
}

/// POST /users - Add a user to a group
///
/// # Responses
///
/// * 201 Created - User added with its assigned address
/// * 400 Bad Request - Validation error or unassignable address
/// * 404 Not Found - Group does not exist
/// * 409 Conflict - Name taken, address in use or group exhausted
#[axum::debug_handler]
async fn add_user(
    State(state): State<AppState>,
    Json(dto): Json<AddUserDto>,
) -> Result<(StatusCode, Json<UserResponseDto>), ApiError> {
    dto.validate()?;

    let user = state.add_user_use_case.execute(dto.into())?;

    Ok((StatusCode::CREATED, Json(UserResponseDto::from(user))))
}

/// GET /users/{name} - Get a user and its assignment
#[axum::debug_handler]
async fn get_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<UserResponseDto>, ApiError> {
    let user = state.get_user_use_case.execute(&name)?;
    Ok(Json(UserResponseDto::from(user)))
}

/// PUT /users/{name} - Move a user to a group and address
///
/// Targeting the user's current group re-addresses it in place.
///
/// # Responses
///
/// * 200 OK - User moved
/// * 400 Bad Request - Validation error or unassignable address
/// * 404 Not Found - User or group does not exist
/// * 409 Conflict - Address in use or group exhausted; the user was not moved
#[axum::debug_handler]
async fn move_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(dto): Json<MoveUserDto>,
) -> Result<Json<UserResponseDto>, ApiError> {
    dto.validate()?;

    let user = state.move_user_use_case.execute(&name, dto.into())?;

    Ok(Json(UserResponseDto::from(user)))
}

/// DELETE /users/{name} - Remove a user and free its address
#[axum::debug_handler]
async fn remove_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.remove_user_use_case.execute(&name)?;
    Ok(StatusCode::NO_CONTENT)
}
