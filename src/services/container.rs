//! Service container - centralized service construction and access.

use std::sync::Arc;

use super::{AuthService, DepartmentService, EmployeeService, HolidayService, UserService};
use crate::config::Config;
use crate::infra::Persistence;

/// Concrete service container holding one instance of every service
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    employee_service: Arc<dyn EmployeeService>,
    holiday_service: Arc<dyn HolidayService>,
    user_service: Arc<dyn UserService>,
    department_service: Arc<dyn DepartmentService>,
}

impl Services {
    /// Build the full service graph from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            Authenticator, DepartmentManager, EmployeeManager, HolidayManager, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            employee_service: Arc::new(EmployeeManager::new(uow.clone())),
            holiday_service: Arc::new(HolidayManager::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow.clone())),
            department_service: Arc::new(DepartmentManager::new(uow)),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }

    pub fn holidays(&self) -> Arc<dyn HolidayService> {
        self.holiday_service.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    pub fn departments(&self) -> Arc<dyn DepartmentService> {
        self.department_service.clone()
    }
}
