//! API layer - HTTP handlers, middleware, and routing.

pub mod extractors;
pub mod handlers;
pub mod middleware;
mod openapi;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
