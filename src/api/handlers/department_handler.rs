//! Department handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::require_admin;
use crate::api::AppState;
use crate::domain::{CreateDepartmentRequest, DepartmentResponse, Principal};
use crate::errors::AppResult;

/// Create admin department-management routes
pub fn admin_department_routes() -> Router<AppState> {
    Router::new().route("/", get(list_departments_admin).post(create_department))
}

/// List departments (any authenticated caller; names are needed to
/// render department-scoped views)
#[utoipa::path(
    get,
    path = "/api/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All departments", body = [DepartmentResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DepartmentResponse>>> {
    let departments = state.department_service.list().await?;
    Ok(Json(departments))
}

/// List departments via the admin surface
#[utoipa::path(
    get,
    path = "/api/admin/departments",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All departments", body = [DepartmentResponse]),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_departments_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<Vec<DepartmentResponse>>> {
    require_admin(&principal)?;
    let departments = state.department_service.list().await?;
    Ok(Json(departments))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/admin/departments",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_department(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<CreateDepartmentRequest>,
) -> AppResult<(StatusCode, Json<DepartmentResponse>)> {
    require_admin(&principal)?;
    let department = state.department_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(department)))
}
