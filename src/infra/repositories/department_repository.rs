//! Department repository - trait and Postgres implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::department::{ActiveModel, Column, Entity};
use crate::domain::Department;
use crate::errors::{AppError, AppResult};

/// Department persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Department>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>>;

    /// All departments, ordered by name
    async fn list(&self) -> AppResult<Vec<Department>>;

    /// Insert a new department; `DuplicateDepartment` on a name conflict
    async fn insert(&self, name: String) -> AppResult<Department>;
}

/// Postgres-backed department repository
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Department>> {
        let model = Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Department::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        let model = Entity::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Department::from))
    }

    async fn list(&self) -> AppResult<Vec<Department>> {
        let models = Entity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Department::from).collect())
    }

    async fn insert(&self, name: String) -> AppResult<Department> {
        let active = ActiveModel {
            id: NotSet,
            name: Set(name),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| AppError::on_unique_violation(e, AppError::DuplicateDepartment))?;

        Ok(Department::from(model))
    }
}
