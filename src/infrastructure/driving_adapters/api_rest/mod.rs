//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::use_cases::{
    AddUserUseCase, CreateGroupUseCase, DeleteGroupUseCase, ExportSnapshotUseCase,
    GetGroupUseCase, GetUserUseCase, ListGroupsUseCase, MoveUserUseCase, RemoveUserUseCase,
    RestoreSnapshotUseCase, UpdateGroupRuleUseCase,
};
use crate::domain::gateways::GroupRegistry;
use crate::infrastructure::driven_adapters::config::AppConfig;
use handlers::{groups, snapshot, users};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub create_group_use_case: Arc<CreateGroupUseCase>,
    pub delete_group_use_case: Arc<DeleteGroupUseCase>,
    pub update_group_rule_use_case: Arc<UpdateGroupRuleUseCase>,
    pub get_group_use_case: Arc<GetGroupUseCase>,
    pub list_groups_use_case: Arc<ListGroupsUseCase>,
    pub add_user_use_case: Arc<AddUserUseCase>,
    pub move_user_use_case: Arc<MoveUserUseCase>,
    pub remove_user_use_case: Arc<RemoveUserUseCase>,
    pub get_user_use_case: Arc<GetUserUseCase>,
    pub export_snapshot_use_case: Arc<ExportSnapshotUseCase>,
    pub restore_snapshot_use_case: Arc<RestoreSnapshotUseCase>,
}

impl AppState {
    /// Wire every use case to the same registry
    #[must_use]
    pub fn new(config: Arc<AppConfig>, group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self {
            config,
            create_group_use_case: Arc::new(CreateGroupUseCase::new(group_registry.clone())),
            delete_group_use_case: Arc::new(DeleteGroupUseCase::new(group_registry.clone())),
            update_group_rule_use_case: Arc::new(UpdateGroupRuleUseCase::new(group_registry.clone())),
            get_group_use_case: Arc::new(GetGroupUseCase::new(group_registry.clone())),
            list_groups_use_case: Arc::new(ListGroupsUseCase::new(group_registry.clone())),
            add_user_use_case: Arc::new(AddUserUseCase::new(group_registry.clone())),
            move_user_use_case: Arc::new(MoveUserUseCase::new(group_registry.clone())),
            remove_user_use_case: Arc::new(RemoveUserUseCase::new(group_registry.clone())),
            get_user_use_case: Arc::new(GetUserUseCase::new(group_registry.clone())),
            export_snapshot_use_case: Arc::new(ExportSnapshotUseCase::new(group_registry.clone())),
            restore_snapshot_use_case: Arc::new(RestoreSnapshotUseCase::new(group_registry)),
        }
    }
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/groups", groups::router())
        .nest("/users", users::router())
        .nest("/snapshot", snapshot::router())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
