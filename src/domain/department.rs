//! Department entity and DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Department domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: i32,
    pub name: String,
}

/// Department creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentRequest {
    /// Department name (unique)
    #[validate(length(min = 1, message = "Department name is required"))]
    #[schema(example = "Engineering")]
    pub name: String,
}

/// Department response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i32,
    /// Department name
    #[schema(example = "Engineering")]
    pub name: String,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
        }
    }
}
