//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    AuthService, DepartmentService, EmployeeService, HolidayService, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub holiday_service: Arc<dyn HolidayService>,
    pub user_service: Arc<dyn UserService>,
    pub department_service: Arc<dyn DepartmentService>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            employee_service: container.employees(),
            holiday_service: container.holidays(),
            user_service: container.users(),
            department_service: container.departments(),
            database,
        }
    }
}
