//! Snapshot Handlers
//!
//! Export and restore of the whole registry as JSON.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::domain::models::snapshot::RegistrySnapshot;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for the snapshot endpoint
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(export_snapshot).put(restore_snapshot))
}

/// GET /snapshot - Export the registry
#[axum::debug_handler]
async fn export_snapshot(State(state): State<AppState>) -> Json<RegistrySnapshot> {
    Json(state.export_snapshot_use_case.execute())
}

/// PUT /snapshot - Replace the registry with the given snapshot
///
/// # Responses
///
/// * 204 No Content - Registry replaced
/// * 400 Bad Request - Snapshot is inconsistent; the registry is unchanged
/// * 409 Conflict - Snapshot groups overlap or share a user
#[axum::debug_handler]
async fn restore_snapshot(
    State(state): State<AppState>,
    Json(snapshot): Json<RegistrySnapshot>,
) -> Result<StatusCode, ApiError> {
    state.restore_snapshot_use_case.execute(snapshot)?;
    Ok(StatusCode::NO_CONTENT)
}
