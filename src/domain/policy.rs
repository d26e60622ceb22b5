//! Access policy - pure functions over (principal, department).
//!
//! Every authorization decision in the application funnels through these
//! three predicates. They do no I/O and are total over their inputs, which
//! keeps the rules testable as a truth table.

use super::{Principal, Role};

/// Can the principal read records belonging to `department_id`?
///
/// Admin sees everything; HR and Viewer only their own department.
pub fn can_view(principal: &Principal, department_id: i32) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::Hr | Role::Viewer => principal.department_id == Some(department_id),
    }
}

/// Can the principal mutate records belonging to `department_id`?
///
/// Admin always; HR only within their own department; Viewer never.
/// Gates employee create/update/delete and holiday creation.
pub fn can_edit(principal: &Principal, department_id: i32) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::Hr => principal.department_id == Some(department_id),
        Role::Viewer => false,
    }
}

/// Can the principal manage user accounts and departments? Admin only.
pub fn can_manage_users(principal: &Principal) -> bool {
    principal.role == Role::Admin
}
