//! Infrastructure layer - database, repositories, unit of work.

pub mod db;
pub mod repositories;
mod unit_of_work;

pub use db::Database;
pub use repositories::{
    DepartmentRepository, EmployeeRepository, HolidayRepository, UserRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub(crate) use unit_of_work::test_support;
