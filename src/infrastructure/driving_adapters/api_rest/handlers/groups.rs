//! Group Handlers
//!
//! HTTP handlers for group management and rule updates.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use validator::Validate;

use crate::infrastructure::driving_adapters::api_rest::dto::group::{
    CreateGroupDto, GroupResponseDto, UpdateGroupRuleDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for group endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_group).get(list_groups))
        .route("/{name}", get(get_group).delete(delete_group))
        .route("/{name}/rule", put(update_group_rule))
}

/// POST /groups - Create a new group
///
/// # Responses
///
/// * 201 Created - Group created successfully
/// * 400 Bad Request - Validation error or unparsable rule
/// * 409 Conflict - Name taken or rule overlaps another group
#[axum::debug_handler]
async fn create_group(
    State(state): State<AppState>,
    Json(dto): Json<CreateGroupDto>,
) -> Result<(StatusCode, Json<GroupResponseDto>), ApiError> {
    dto.validate()?;

    let group = state.create_group_use_case.execute(dto.into())?;

    Ok((StatusCode::CREATED, Json(GroupResponseDto::from(group))))
}

/// GET /groups - List all groups, sorted by name
#[axum::debug_handler]
async fn list_groups(State(state): State<AppState>) -> Json<Vec<GroupResponseDto>> {
    let groups = state.list_groups_use_case.execute();
    Json(groups.into_iter().map(GroupResponseDto::from).collect())
}

/// GET /groups/{name} - Get a group with its subnets and users
///
/// # Responses
///
/// * 200 OK - Group found
/// * 404 Not Found - Group does not exist
#[axum::debug_handler]
async fn get_group(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<GroupResponseDto>, ApiError> {
    let group = state.get_group_use_case.execute(&name)?;
    Ok(Json(GroupResponseDto::from(group)))
}

/// PUT /groups/{name}/rule - Replace the rule of a group
///
/// # Responses
///
/// * 200 OK - Rule replaced, every user kept its address
/// * 400 Bad Request - Validation error or unparsable rule
/// * 404 Not Found - Group does not exist
/// * 409 Conflict - Rule overlaps another group or would orphan an address
#[axum::debug_handler]
async fn update_group_rule(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(dto): Json<UpdateGroupRuleDto>,
) -> Result<Json<GroupResponseDto>, ApiError> {
    dto.validate()?;

    let group = state.update_group_rule_use_case.execute(&name, &dto.rule)?;

    Ok(Json(GroupResponseDto::from(group)))
}

/// DELETE /groups/{name} - Delete an empty group
///
/// # Responses
///
/// * 204 No Content - Group deleted
/// * 404 Not Found - Group does not exist
/// * 409 Conflict - Group still has users
#[axum::debug_handler]
async fn delete_group(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.delete_group_use_case.execute(&name)?;
    Ok(StatusCode::NO_CONTENT)
}
