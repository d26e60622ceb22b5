//! User account service - the admin-only account surface.
//!
//! Admin gating happens at the handler layer (`require_admin`); these
//! operations assume the caller is already authorized.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    CreateUserRequest, Password, UpdateUserRequest, User, UserFilter, UserResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User account operations
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list(&self, filter: UserFilter) -> AppResult<Vec<UserResponse>>;

    async fn get(&self, id: i32) -> AppResult<UserResponse>;

    async fn create(&self, request: CreateUserRequest) -> AppResult<UserResponse>;

    /// Replace username, role and department. The password is rehashed
    /// only when a non-blank value is supplied.
    async fn update(&self, id: i32, request: UpdateUserRequest) -> AppResult<UserResponse>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn require_department_if_set(&self, department_id: Option<i32>) -> AppResult<()> {
        if let Some(id) = department_id {
            self.uow
                .departments()
                .find_by_id(id)
                .await?
                .ok_or(AppError::DepartmentNotFound)?;
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list(&self, filter: UserFilter) -> AppResult<Vec<UserResponse>> {
        let users = self.uow.users().list(&filter).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<UserResponse> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(AppError::NotFound("User"))
    }

    async fn create(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        if self
            .uow
            .users()
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateUsername);
        }

        self.require_department_if_set(request.department_id).await?;

        let password_hash = Password::new(&request.password)?.into_string();
        let user = self
            .uow
            .users()
            .insert(request.username, password_hash, request.role, request.department_id)
            .await?;

        Ok(UserResponse::from(user))
    }

    async fn update(&self, id: i32, request: UpdateUserRequest) -> AppResult<UserResponse> {
        let current = self
            .uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        if request.username != current.username {
            if self
                .uow
                .users()
                .find_by_username(&request.username)
                .await?
                .is_some()
            {
                return Err(AppError::DuplicateUsername);
            }
        }

        self.require_department_if_set(request.department_id).await?;

        let password_hash = match request.password.as_deref() {
            Some(p) if !p.trim().is_empty() => Password::new(p)?.into_string(),
            _ => current.password_hash,
        };

        let user = self
            .uow
            .users()
            .update(User {
                id,
                username: request.username,
                password_hash,
                role: request.role,
                department_id: request.department_id,
            })
            .await?;

        Ok(UserResponse::from(user))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.uow.users().delete(id).await? {
            return Err(AppError::NotFound("User"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infra::repositories::MockUserRepository;
    use crate::infra::test_support::StubUnitOfWork;

    fn stored(id: i32, username: &str, hash: &str) -> User {
        User {
            id,
            username: username.to_string(),
            password_hash: hash.to_string(),
            role: Role::Viewer,
            department_id: None,
        }
    }

    fn service_with(users: MockUserRepository) -> UserManager<StubUnitOfWork> {
        UserManager::new(Arc::new(StubUnitOfWork {
            users: Some(Arc::new(users)),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn create_rejects_taken_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|name| Ok(Some(stored(1, name, "hash"))));

        let service = service_with(users);
        let result = service
            .create(CreateUserRequest {
                username: "jdoe".to_string(),
                password: "Password123".to_string(),
                role: Role::Viewer,
                department_id: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn update_keeps_hash_when_password_blank() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "jdoe", "original-hash"))));
        users
            .expect_update()
            .withf(|user| user.password_hash == "original-hash")
            .returning(Ok);

        let service = service_with(users);
        let result = service
            .update(
                1,
                UpdateUserRequest {
                    username: "jdoe".to_string(),
                    password: Some("   ".to_string()),
                    role: Role::Viewer,
                    department_id: None,
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_rehashes_non_blank_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "jdoe", "original-hash"))));
        users
            .expect_update()
            .withf(|user| user.password_hash != "original-hash")
            .returning(Ok);

        let service = service_with(users);
        let result = service
            .update(
                1,
                UpdateUserRequest {
                    username: "jdoe".to_string(),
                    password: Some("NewPassword123".to_string()),
                    role: Role::Viewer,
                    department_id: None,
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn delete_of_missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_delete().returning(|_| Ok(false));

        let service = service_with(users);
        let result = service.delete(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
