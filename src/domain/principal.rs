//! Authenticated caller identity.

use serde::Serialize;
use utoipa::ToSchema;

use super::Role;

/// The authenticated caller, resolved from a verified token.
///
/// The role comes from the token claims; username and department are
/// re-read from the store at request time so stale claims cannot grant
/// access through a department the account no longer belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub department_id: Option<i32>,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
