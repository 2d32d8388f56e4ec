// Users API routes
// Decision: Listing is public, matching the events listing

use axum::{extract::State, routing::get, Json, Router};
use sparkbytes_core::User;
use std::sync::Arc;

use super::common::{ErrorResponse, ListResponse};
use crate::services::{ServiceError, UserService};

/// App state for users routes
#[derive(Clone)]
pub struct UsersState {
    pub service: Arc<UserService>,
}

/// Create users routes
pub fn routes(state: UsersState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .with_state(state)
}

/// GET /users - List all users
///
/// Newest accounts first. Password hashes are never part of the response.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of users", body = ListResponse<User>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<UsersState>,
) -> Result<Json<ListResponse<User>>, ServiceError> {
    let users = state.service.list().await?;
    Ok(Json(ListResponse::new(users)))
}
