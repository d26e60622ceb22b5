//! User account repository - trait and Postgres implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::user::{ActiveModel, Column, Entity};
use crate::domain::{Role, User, UserFilter};
use crate::errors::{AppError, AppResult};

/// User account persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Accounts matching the filter, ordered by username
    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Insert a new account; `DuplicateUsername` on a username conflict
    async fn insert(
        &self,
        username: String,
        password_hash: String,
        role: Role,
        department_id: Option<i32>,
    ) -> AppResult<User>;

    /// Full replace of the stored account by id
    async fn update(&self, user: User) -> AppResult<User>;

    /// Returns false when no row with this id existed
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Postgres-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let model = Entity::find_by_id(id).one(&self.db).await?;
        model.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let model = Entity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?;
        model.map(User::try_from).transpose()
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut query = Entity::find();

        if let Some(role) = filter.role {
            query = query.filter(Column::Role.eq(role.as_str()));
        }
        if let Some(department_id) = filter.department_id {
            query = query.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(fragment) = &filter.username_contains {
            query = query.filter(Column::Username.contains(fragment));
        }

        let models = query.order_by_asc(Column::Username).all(&self.db).await?;
        models.into_iter().map(User::try_from).collect()
    }

    async fn insert(
        &self,
        username: String,
        password_hash: String,
        role: Role,
        department_id: Option<i32>,
    ) -> AppResult<User> {
        let active = ActiveModel {
            id: NotSet,
            username: Set(username),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            department_id: Set(department_id),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| AppError::on_unique_violation(e, AppError::DuplicateUsername))?;

        User::try_from(model)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let active = ActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_string()),
            department_id: Set(user.department_id),
        };

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::on_unique_violation(e, AppError::DuplicateUsername))?;

        User::try_from(model)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
