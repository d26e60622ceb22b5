//! EVMS - Employee and leave management API
//!
//! Clean-architecture HTTP API over PostgreSQL with three
//! department-scoped roles (Admin, HR, Viewer).
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, access policy, and pure business rules
//! - **services**: Application use cases behind traits
//! - **infra**: Database, repositories, migrations
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Principal, Role};
pub use errors::{AppError, AppResult};
