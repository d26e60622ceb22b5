//! Service layer - use-case orchestration behind traits.

mod auth_service;
mod container;
mod department_service;
mod employee_service;
mod holiday_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::Services;
pub use department_service::{DepartmentManager, DepartmentService};
pub use employee_service::{EmployeeManager, EmployeeService};
pub use holiday_service::{HolidayManager, HolidayService};
pub use user_service::{UserManager, UserService};
