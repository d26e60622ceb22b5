//! Employee directory service - scoped listing and CRUD.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{
    normalize_middle_name, policy, CreateEmployeeRequest, Employee, EmployeeResponse, EmployeeSort,
    NewEmployee, PatchEmployeeRequest, Principal, Role, UpdateEmployeeRequest,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Employee directory operations. Authorization is enforced here, not in
/// the handlers, so every caller goes through the same policy.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Page of employees visible to the principal.
    ///
    /// Admin sees all departments (optionally filtered); HR and Viewer are
    /// forced to their own department regardless of the requested filter,
    /// and get an empty page if they have none.
    async fn list(
        &self,
        principal: &Principal,
        department_id: Option<i32>,
        page: PaginationParams,
        sort: EmployeeSort,
    ) -> AppResult<Paginated<EmployeeResponse>>;

    async fn get(&self, principal: &Principal, id: i32) -> AppResult<EmployeeResponse>;

    async fn create(
        &self,
        principal: &Principal,
        request: CreateEmployeeRequest,
    ) -> AppResult<EmployeeResponse>;

    /// Full replace (PUT). Department and hire date retain their current
    /// values when absent from the request.
    async fn update(
        &self,
        principal: &Principal,
        id: i32,
        request: UpdateEmployeeRequest,
    ) -> AppResult<EmployeeResponse>;

    /// Partial update (PATCH). Fields present and non-blank override;
    /// everything else is retained unchanged.
    async fn partial_update(
        &self,
        principal: &Principal,
        id: i32,
        request: PatchEmployeeRequest,
    ) -> AppResult<EmployeeResponse>;

    async fn delete(&self, principal: &Principal, id: i32) -> AppResult<()>;
}

/// Concrete implementation of EmployeeService using Unit of Work.
pub struct EmployeeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EmployeeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load an employee and check edit rights against its current
    /// department. Shared precondition of update, patch and delete.
    async fn find_editable(&self, principal: &Principal, id: i32) -> AppResult<Employee> {
        let employee = self
            .uow
            .employees()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Employee"))?;

        if !policy::can_edit(principal, employee.department_id) {
            return Err(AppError::Forbidden);
        }

        Ok(employee)
    }

    /// Verify a department exists before attaching an employee to it
    async fn require_department(&self, department_id: i32) -> AppResult<()> {
        self.uow
            .departments()
            .find_by_id(department_id)
            .await?
            .ok_or(AppError::DepartmentNotFound)?;
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeManager<U> {
    async fn list(
        &self,
        principal: &Principal,
        department_id: Option<i32>,
        page: PaginationParams,
        sort: EmployeeSort,
    ) -> AppResult<Paginated<EmployeeResponse>> {
        let scope = match principal.role {
            Role::Admin => department_id,
            Role::Hr | Role::Viewer => match principal.department_id {
                Some(own) => Some(own),
                None => return Ok(Paginated::empty(page.page, page.limit())),
            },
        };

        let (employees, total) = self.uow.employees().list(scope, &page, sort).await?;

        Ok(Paginated::new(employees, page.page, page.limit(), total).map(EmployeeResponse::from))
    }

    async fn get(&self, principal: &Principal, id: i32) -> AppResult<EmployeeResponse> {
        let employee = self
            .uow
            .employees()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Employee"))?;

        if !policy::can_view(principal, employee.department_id) {
            return Err(AppError::Forbidden);
        }

        Ok(EmployeeResponse::from(employee))
    }

    async fn create(
        &self,
        principal: &Principal,
        request: CreateEmployeeRequest,
    ) -> AppResult<EmployeeResponse> {
        let department_id = request
            .department_id
            .ok_or_else(|| AppError::validation("departmentId is required"))?;

        if !policy::can_edit(principal, department_id) {
            return Err(AppError::Forbidden);
        }

        self.require_department(department_id).await?;

        let new_employee = NewEmployee {
            first_name: request.first_name,
            last_name: request.last_name,
            middle_name: normalize_middle_name(request.middle_name),
            department_id,
            role_in_company: request.role_in_company,
            hired_at: request.hired_at.unwrap_or_else(|| Utc::now().date_naive()),
        };

        let employee = self.uow.employees().insert(new_employee).await?;
        Ok(EmployeeResponse::from(employee))
    }

    async fn update(
        &self,
        principal: &Principal,
        id: i32,
        request: UpdateEmployeeRequest,
    ) -> AppResult<EmployeeResponse> {
        // Permission is checked against the pre-update department
        let current = self.find_editable(principal, id).await?;

        let department_id = request.department_id.unwrap_or(current.department_id);
        if department_id != current.department_id {
            self.require_department(department_id).await?;
        }

        let updated = Employee {
            id: current.id,
            first_name: request.first_name,
            last_name: request.last_name,
            middle_name: normalize_middle_name(request.middle_name),
            department_id,
            role_in_company: request.role_in_company,
            hired_at: request.hired_at.unwrap_or(current.hired_at),
            is_on_holiday: request.is_on_holiday,
        };

        let employee = self.uow.employees().update(updated).await?;
        Ok(EmployeeResponse::from(employee))
    }

    async fn partial_update(
        &self,
        principal: &Principal,
        id: i32,
        request: PatchEmployeeRequest,
    ) -> AppResult<EmployeeResponse> {
        let current = self.find_editable(principal, id).await?;

        let department_id = request.department_id.unwrap_or(current.department_id);
        if department_id != current.department_id {
            self.require_department(department_id).await?;
        }

        let updated = Employee {
            id: current.id,
            first_name: non_blank(request.first_name).unwrap_or(current.first_name),
            last_name: non_blank(request.last_name).unwrap_or(current.last_name),
            middle_name: normalize_middle_name(request.middle_name).or(current.middle_name),
            department_id,
            role_in_company: non_blank(request.role_in_company).unwrap_or(current.role_in_company),
            hired_at: request.hired_at.unwrap_or(current.hired_at),
            is_on_holiday: request.is_on_holiday.unwrap_or(current.is_on_holiday),
        };

        let employee = self.uow.employees().update(updated).await?;
        Ok(EmployeeResponse::from(employee))
    }

    async fn delete(&self, principal: &Principal, id: i32) -> AppResult<()> {
        self.find_editable(principal, id).await?;

        // A concurrent delete between the check and here still yields 404
        if !self.uow.employees().delete(id).await? {
            return Err(AppError::NotFound("Employee"));
        }
        Ok(())
    }
}
