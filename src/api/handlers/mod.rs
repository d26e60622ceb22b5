//! HTTP request handlers.

pub mod auth_handler;
pub mod department_handler;
pub mod employee_handler;
pub mod holiday_handler;
pub mod user_handler;

pub use department_handler::admin_department_routes;
pub use employee_handler::employee_routes;
pub use user_handler::user_routes;
