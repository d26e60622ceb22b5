//! Holiday ledger handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};

use crate::api::AppState;
use crate::domain::{CreateHolidayRequest, HolidayResponse, Principal};
use crate::errors::AppResult;

/// Record a holiday for an employee
#[utoipa::path(
    post,
    path = "/api/holidays",
    tag = "Holidays",
    security(("bearer_auth" = [])),
    request_body = CreateHolidayRequest,
    responses(
        (status = 201, description = "Holiday recorded", body = HolidayResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "No edit rights or eligibility violation"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn create_holiday(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateHolidayRequest>,
) -> AppResult<(StatusCode, Json<HolidayResponse>)> {
    let holiday = state
        .holiday_service
        .add_holiday(&principal, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(holiday)))
}

/// List an employee's holiday history, newest first
#[utoipa::path(
    get,
    path = "/api/employees/{id}/holidays",
    tag = "Holidays",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Holiday history", body = [HolidayResponse]),
        (status = 403, description = "Outside the caller's department"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn list_employee_holidays(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<HolidayResponse>>> {
    let holidays = state
        .holiday_service
        .list_for_employee(&principal, id)
        .await?;
    Ok(Json(holidays))
}
