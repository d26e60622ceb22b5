//! Domain layer - entities, value objects, and pure business rules.
//!
//! Nothing in this module touches the database or the HTTP stack.

mod department;
mod employee;
mod holiday;
mod password;
pub mod policy;
mod principal;
mod role;
mod user;

pub use department::{CreateDepartmentRequest, Department, DepartmentResponse};
pub use employee::{
    canonical_middle_name, normalize_middle_name, CreateEmployeeRequest, Employee, EmployeeResponse,
    EmployeeSort, EmployeeSortKey, NewEmployee, PatchEmployeeRequest, SortDir,
    UpdateEmployeeRequest,
};
pub use holiday::{
    next_eligible_start, CreateHolidayRequest, Holiday, HolidayResponse, NewHoliday,
};
pub use password::Password;
pub use principal::Principal;
pub use role::Role;
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserFilter, UserResponse};
