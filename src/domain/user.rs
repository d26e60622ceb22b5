//! User account entity and DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::Role;

/// User account domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub department_id: Option<i32>,
}

/// User creation request (admin surface)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Login name (unique)
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Account role
    pub role: Role,
    /// Department the account is scoped to (required for HR and Viewer scoping)
    pub department_id: Option<i32>,
}

/// User update request (admin surface).
///
/// Username, role and department are replaced. The password is rehashed
/// only when a non-blank value is supplied.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// New password; leave absent or blank to keep the current one
    pub password: Option<String>,
    pub role: Role,
    pub department_id: Option<i32>,
}

/// Filters for listing user accounts
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub department_id: Option<i32>,
    /// Substring match on the username
    pub username_contains: Option<String>,
}

/// User response (never carries the password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    #[schema(example = "jdoe")]
    pub username: String,
    pub role: Role,
    pub department_id: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            department_id: user.department_id,
        }
    }
}
