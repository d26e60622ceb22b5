//! SeaORM entity definitions.
//!
//! These model the database schema only; conversion into domain types
//! happens at the repository boundary.

pub mod department;
pub mod employee;
pub mod holiday_history;
pub mod user;
