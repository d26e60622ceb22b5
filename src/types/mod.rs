//! Shared types used across layers.

mod pagination;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
