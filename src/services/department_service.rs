//! Department service.
//!
//! Listing is open to any authenticated principal (scoped views still
//! need department names); creation is admin-only, gated at the handler.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateDepartmentRequest, DepartmentResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Department operations
#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<DepartmentResponse>>;

    async fn get(&self, id: i32) -> AppResult<DepartmentResponse>;

    async fn create(&self, request: CreateDepartmentRequest) -> AppResult<DepartmentResponse>;
}

/// Concrete implementation of DepartmentService using Unit of Work.
pub struct DepartmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DepartmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DepartmentService for DepartmentManager<U> {
    async fn list(&self) -> AppResult<Vec<DepartmentResponse>> {
        let departments = self.uow.departments().list().await?;
        Ok(departments.into_iter().map(DepartmentResponse::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<DepartmentResponse> {
        self.uow
            .departments()
            .find_by_id(id)
            .await?
            .map(DepartmentResponse::from)
            .ok_or(AppError::NotFound("Department"))
    }

    async fn create(&self, request: CreateDepartmentRequest) -> AppResult<DepartmentResponse> {
        if self
            .uow
            .departments()
            .find_by_name(&request.name)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateDepartment);
        }

        let department = self.uow.departments().insert(request.name).await?;
        Ok(DepartmentResponse::from(department))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Department;
    use crate::infra::repositories::MockDepartmentRepository;
    use crate::infra::test_support::StubUnitOfWork;

    fn service_with(departments: MockDepartmentRepository) -> DepartmentManager<StubUnitOfWork> {
        DepartmentManager::new(Arc::new(StubUnitOfWork {
            departments: Some(Arc::new(departments)),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn create_rejects_taken_name() {
        let mut departments = MockDepartmentRepository::new();
        departments.expect_find_by_name().returning(|name| {
            Ok(Some(Department {
                id: 1,
                name: name.to_string(),
            }))
        });

        let service = service_with(departments);
        let result = service
            .create(CreateDepartmentRequest {
                name: "Engineering".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::DuplicateDepartment)));
    }

    #[tokio::test]
    async fn get_of_missing_department_is_not_found() {
        let mut departments = MockDepartmentRepository::new();
        departments.expect_find_by_id().returning(|_| Ok(None));

        let service = service_with(departments);
        let result = service.get(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
