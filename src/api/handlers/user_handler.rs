//! User account handlers (admin surface).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::require_admin;
use crate::api::AppState;
use crate::domain::{
    CreateUserRequest, Principal, Role, UpdateUserRequest, UserFilter, UserResponse,
};
use crate::errors::AppResult;

/// Create admin user-management routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// User list query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub role: Option<Role>,
    pub department_id: Option<i32>,
    /// Substring match on the username
    pub username: Option<String>,
}

/// List user accounts
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(UserListQuery),
    responses(
        (status = 200, description = "User accounts", body = [UserResponse]),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_admin(&principal)?;

    let filter = UserFilter {
        role: query.role,
        department_id: query.department_id,
        username_contains: query.username,
    };
    let users = state.user_service.list(filter).await?;
    Ok(Json(users))
}

/// Get one user account
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&principal)?;
    let user = state.user_service.get(id).await?;
    Ok(Json(user))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error or duplicate username"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_admin(&principal)?;
    let user = state.user_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user account
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error or duplicate username"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&principal)?;
    let user = state.user_service.update(id, payload).await?;
    Ok(Json(user))
}

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    require_admin(&principal)?;
    state.user_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
