//! Employee directory handlers.

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
use crate::api::AppState;
use crate::domain::{
    CreateEmployeeRequest, EmployeeResponse, EmployeeSort, PatchEmployeeRequest, Principal,
    UpdateEmployeeRequest,
};
use crate::errors::AppResult;
use crate::types::{Paginated, PaginationParams};

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee)
                .put(update_employee)
                .patch(patch_employee)
                .delete(delete_employee),
        )
        .route(
            "/:id/holidays",
            get(super::holiday_handler::list_employee_holidays),
        )
}

/// Employee list query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    /// Restrict to one department (Admin only; others are always scoped
    /// to their own department)
    pub department_id: Option<i32>,
    /// 1-indexed page number
    pub page: Option<u64>,
    /// Items per page
    pub size: Option<u64>,
    /// `field` or `field,dir` - e.g. `lastName,desc`
    pub sort: Option<String>,
}

/// List employees visible to the caller
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(EmployeeListQuery),
    responses(
        (status = 200, description = "Page of employees"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<EmployeeListQuery>,
) -> AppResult<Json<Paginated<EmployeeResponse>>> {
    let defaults = PaginationParams::default();
    let page = PaginationParams {
        page: query.page.unwrap_or(defaults.page),
        size: query.size.unwrap_or(defaults.size),
    };
    let sort = query
        .sort
        .as_deref()
        .map(EmployeeSort::parse)
        .unwrap_or_default();

    let result = state
        .employee_service
        .list(&principal, query.department_id, page, sort)
        .await?;

    Ok(Json(result))
}

/// Get one employee
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 403, description = "Outside the caller's department"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.employee_service.get(&principal, id).await?;
    Ok(Json(employee))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation error or duplicate"),
        (status = 403, description = "No edit rights in the target department")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    let employee = state.employee_service.create(&principal, payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Replace an employee (department and hire date retained when absent)
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee id")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Validation error or duplicate"),
        (status = 403, description = "No edit rights"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state
        .employee_service
        .update(&principal, id, payload)
        .await?;
    Ok(Json(employee))
}

/// Partially update an employee
#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee id")),
    request_body = PatchEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Validation error or duplicate"),
        (status = 403, description = "No edit rights"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn patch_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
    Json(payload): Json<PatchEmployeeRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state
        .employee_service
        .partial_update(&principal, id, payload)
        .await?;
    Ok(Json(employee))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 403, description = "No edit rights"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.employee_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
