//! Repository layer - Data access abstraction
//!
//! Repositories provide a narrow, domain-typed interface over persistence
//! so services never touch the ORM directly.

mod department_repository;
mod employee_repository;
pub(crate) mod entities;
mod holiday_repository;
mod user_repository;

pub use department_repository::{DepartmentRepository, DepartmentStore};
pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use holiday_repository::{HolidayRepository, HolidayStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use holiday_repository::MockHolidayRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
