//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, department_handler, employee_handler, holiday_handler, user_handler,
};
use crate::domain::{
    CreateDepartmentRequest, CreateEmployeeRequest, CreateHolidayRequest, CreateUserRequest,
    DepartmentResponse, EmployeeResponse, HolidayResponse, PatchEmployeeRequest, Principal, Role,
    UpdateEmployeeRequest, UpdateUserRequest, UserResponse,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the employee and leave management API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EVMS",
        version = "0.1.0",
        description = "Employee and leave management API with department-scoped roles",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::me,
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::create_employee,
        employee_handler::update_employee,
        employee_handler::patch_employee,
        employee_handler::delete_employee,
        holiday_handler::create_holiday,
        holiday_handler::list_employee_holidays,
        department_handler::list_departments,
        department_handler::list_departments_admin,
        department_handler::create_department,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            Role,
            Principal,
            TokenResponse,
            auth_handler::LoginRequest,
            EmployeeResponse,
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            PatchEmployeeRequest,
            HolidayResponse,
            CreateHolidayRequest,
            DepartmentResponse,
            CreateDepartmentRequest,
            UserResponse,
            CreateUserRequest,
            UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and identity"),
        (name = "Employees", description = "Department-scoped employee directory"),
        (name = "Holidays", description = "Holiday ledger and eligibility"),
        (name = "Departments", description = "Department listing"),
        (name = "Admin", description = "Account and department administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/login"))
                        .build(),
                ),
            );
        }
    }
}
