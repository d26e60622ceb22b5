//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait instead of individual stores, which keeps
//! construction in one place and lets tests swap in fakes wholesale.
//! Multi-step write sequences that must be atomic (the employee
//! duplicate-check-then-write) are transactional inside the store
//! implementations themselves.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    DepartmentRepository, DepartmentStore, EmployeeRepository, EmployeeStore, HolidayRepository,
    HolidayStore, UserRepository, UserStore,
};

/// Repository access for services.
pub trait UnitOfWork: Send + Sync {
    fn departments(&self) -> Arc<dyn DepartmentRepository>;

    fn users(&self) -> Arc<dyn UserRepository>;

    fn employees(&self) -> Arc<dyn EmployeeRepository>;

    fn holidays(&self) -> Arc<dyn HolidayRepository>;
}

/// Concrete implementation of UnitOfWork over Postgres stores
pub struct Persistence {
    department_repo: Arc<DepartmentStore>,
    user_repo: Arc<UserStore>,
    employee_repo: Arc<EmployeeStore>,
    holiday_repo: Arc<HolidayStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance over a shared connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            department_repo: Arc::new(DepartmentStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db.clone())),
            employee_repo: Arc::new(EmployeeStore::new(db.clone())),
            holiday_repo: Arc::new(HolidayStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.department_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employee_repo.clone()
    }

    fn holidays(&self) -> Arc<dyn HolidayRepository> {
        self.holiday_repo.clone()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// UnitOfWork stub for service unit tests. Panics on access to a
    /// repository the test did not provide, which keeps each test's
    /// collaborators explicit.
    #[derive(Default)]
    pub struct StubUnitOfWork {
        pub departments: Option<Arc<dyn DepartmentRepository>>,
        pub users: Option<Arc<dyn UserRepository>>,
        pub employees: Option<Arc<dyn EmployeeRepository>>,
        pub holidays: Option<Arc<dyn HolidayRepository>>,
    }

    impl UnitOfWork for StubUnitOfWork {
        fn departments(&self) -> Arc<dyn DepartmentRepository> {
            self.departments
                .clone()
                .expect("department repository not stubbed")
        }

        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone().expect("user repository not stubbed")
        }

        fn employees(&self) -> Arc<dyn EmployeeRepository> {
            self.employees
                .clone()
                .expect("employee repository not stubbed")
        }

        fn holidays(&self) -> Arc<dyn HolidayRepository> {
            self.holidays
                .clone()
                .expect("holiday repository not stubbed")
        }
    }
}
