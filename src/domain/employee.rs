//! Employee entity, DTOs, and the duplicate-identity rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Employee domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub department_id: i32,
    pub role_in_company: String,
    pub hired_at: NaiveDate,
    pub is_on_holiday: bool,
}

/// Normalize a middle name: blank and absent are the same identity.
///
/// Stored as `None` when blank so the duplicate check and the unique
/// index agree on what "no middle name" means.
pub fn normalize_middle_name(middle_name: Option<String>) -> Option<String> {
    middle_name.filter(|m| !m.trim().is_empty())
}

/// Canonical middle-name value used in duplicate comparisons.
pub fn canonical_middle_name(middle_name: &Option<String>) -> &str {
    middle_name.as_deref().unwrap_or("")
}

/// Data for inserting a new employee (post-validation, post-defaulting)
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub department_id: i32,
    pub role_in_company: String,
    pub hired_at: NaiveDate,
}

/// Employee creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    pub middle_name: Option<String>,
    /// Target department; required (checked in the service so the error
    /// message names the field)
    pub department_id: Option<i32>,
    #[validate(length(min = 1, message = "Role in company is required"))]
    #[schema(example = "Backend Engineer")]
    pub role_in_company: String,
    /// Defaults to today when absent
    pub hired_at: Option<NaiveDate>,
}

/// Employee full-update request (PUT).
///
/// Replaces name fields, role and the holiday flag; department and hire
/// date retain their current values when absent.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub middle_name: Option<String>,
    pub department_id: Option<i32>,
    #[validate(length(min = 1, message = "Role in company is required"))]
    pub role_in_company: String,
    pub hired_at: Option<NaiveDate>,
    #[serde(default)]
    pub is_on_holiday: bool,
}

/// Employee partial-update request (PATCH).
///
/// Only fields that are present and non-blank override; everything else
/// is retained unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub department_id: Option<i32>,
    pub role_in_company: Option<String>,
    pub hired_at: Option<NaiveDate>,
    pub is_on_holiday: Option<bool>,
}

/// Employee response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i32,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    pub middle_name: Option<String>,
    pub department_id: i32,
    #[schema(example = "Backend Engineer")]
    pub role_in_company: String,
    pub hired_at: NaiveDate,
    pub is_on_holiday: bool,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name,
            last_name: e.last_name,
            middle_name: e.middle_name,
            department_id: e.department_id,
            role_in_company: e.role_in_company,
            hired_at: e.hired_at,
            is_on_holiday: e.is_on_holiday,
        }
    }
}

/// Sortable employee columns. Unknown keys fall back to `Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeSortKey {
    #[default]
    Id,
    FirstName,
    LastName,
    HiredAt,
    DepartmentId,
    RoleInCompany,
}

/// Sort direction, default ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Parsed `sort=field,dir` query value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmployeeSort {
    pub key: EmployeeSortKey,
    pub dir: SortDir,
}

impl EmployeeSort {
    /// Parse a `field` or `field,dir` string. Unknown fields and
    /// directions fall back to the defaults rather than erroring.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(2, ',');
        let key = match parts.next().unwrap_or("").trim().to_ascii_lowercase().as_str() {
            "firstname" => EmployeeSortKey::FirstName,
            "lastname" => EmployeeSortKey::LastName,
            "hiredat" => EmployeeSortKey::HiredAt,
            "departmentid" => EmployeeSortKey::DepartmentId,
            "roleincompany" => EmployeeSortKey::RoleInCompany,
            _ => EmployeeSortKey::Id,
        };
        let dir = match parts.next().unwrap_or("").trim().to_ascii_lowercase().as_str() {
            "desc" => SortDir::Desc,
            _ => SortDir::Asc,
        };
        Self { key, dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_middle_name_normalizes_to_none() {
        assert_eq!(normalize_middle_name(None), None);
        assert_eq!(normalize_middle_name(Some("".to_string())), None);
        assert_eq!(normalize_middle_name(Some("   ".to_string())), None);
        assert_eq!(
            normalize_middle_name(Some("Marie".to_string())),
            Some("Marie".to_string())
        );
    }

    #[test]
    fn canonical_middle_name_treats_none_as_empty() {
        assert_eq!(canonical_middle_name(&None), "");
        assert_eq!(canonical_middle_name(&Some("Marie".to_string())), "Marie");
    }

    #[test]
    fn sort_parsing_accepts_case_insensitive_keys() {
        let sort = EmployeeSort::parse("lastName,desc");
        assert_eq!(sort.key, EmployeeSortKey::LastName);
        assert_eq!(sort.dir, SortDir::Desc);

        let sort = EmployeeSort::parse("hiredAt");
        assert_eq!(sort.key, EmployeeSortKey::HiredAt);
        assert_eq!(sort.dir, SortDir::Asc);
    }

    #[test]
    fn sort_parsing_falls_back_on_unknown_input() {
        let sort = EmployeeSort::parse("salary,sideways");
        assert_eq!(sort.key, EmployeeSortKey::Id);
        assert_eq!(sort.dir, SortDir::Asc);
    }
}
