//! Authentication service - login, token issuing and verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, TOKEN_ISSUER};
use crate::domain::{Password, Principal, Role};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub department_id: Option<i32>,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and return a JWT token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token signature, issuer and expiry, and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve verified claims into the current principal.
    ///
    /// The role is taken from the token; username and department are
    /// re-read from the store so a reassigned or deleted account cannot
    /// keep acting on stale attributes until the token expires.
    async fn resolve_principal(&self, claims: Claims) -> AppResult<Principal>;
}

fn generate_token(principal: &Principal, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiry_hours);

    let claims = Claims {
        sub: principal.id,
        username: principal.username.clone(),
        role: principal.role.as_str().to_string(),
        department_id: principal.department_id,
        iss: TOKEN_ISSUER.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse { token })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.uow.users().find_by_username(&username).await?;

        // SECURITY: Perform password verification even if the account does
        // not exist, to prevent timing attacks that could enumerate valid
        // usernames. The dummy hash always fails verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let password_hash = user_result
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(dummy_hash);

        let password_valid = Password::from_hash(password_hash.to_string()).verify(&password);

        let user = match user_result {
            Some(user) if password_valid => user,
            _ => return Err(AppError::InvalidCredentials),
        };

        let principal = Principal {
            id: user.id,
            username: user.username,
            role: user.role,
            department_id: user.department_id,
        };

        generate_token(&principal, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn resolve_principal(&self, claims: Claims) -> AppResult<Principal> {
        let role = Role::parse(&claims.role).ok_or(AppError::InvalidToken)?;

        // A deleted account invalidates its outstanding tokens
        let user = self
            .uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(Principal {
            id: user.id,
            username: user.username,
            role,
            department_id: user.department_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infra::repositories::MockUserRepository;
    use crate::infra::test_support::StubUnitOfWork;

    fn test_config() -> Config {
        Config::for_tests("test-secret-key-with-32-characters!")
    }

    fn stored_user(password: &str) -> User {
        User {
            id: 7,
            username: "hr.lena".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            role: Role::Hr,
            department_id: Some(3),
        }
    }

    fn uow_with_users(repo: MockUserRepository) -> Arc<StubUnitOfWork> {
        Arc::new(StubUnitOfWork {
            users: Some(Arc::new(repo)),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("CorrectHorse1"))));

        let service = Authenticator::new(uow_with_users(repo), test_config());
        let token = service
            .login("hr.lena".to_string(), "CorrectHorse1".to_string())
            .await
            .unwrap();

        let claims = service.verify_token(&token.token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "HR");
        assert_eq!(claims.department_id, Some(3));
        assert_eq!(claims.iss, TOKEN_ISSUER);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("CorrectHorse1"))));

        let service = Authenticator::new(uow_with_users(repo), test_config());
        let result = service
            .login("hr.lena".to_string(), "WrongPassword".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_rejects_unknown_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let service = Authenticator::new(uow_with_users(repo), test_config());
        let result = service
            .login("ghost".to_string(), "AnyPassword1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn tokens_from_another_secret_are_rejected() {
        let service = Authenticator::new(uow_with_users(MockUserRepository::new()), test_config());

        let principal = Principal {
            id: 1,
            username: "x".to_string(),
            role: Role::Admin,
            department_id: None,
        };
        let foreign_config = Config::for_tests("another-secret-key-32-chars-long!!");
        let foreign = generate_token(&principal, &foreign_config).unwrap();

        assert!(service.verify_token(&foreign.token).is_err());
    }

    #[tokio::test]
    async fn resolve_principal_rereads_department_from_store() {
        let mut repo = MockUserRepository::new();
        // Stored department differs from the claim; the store wins
        repo.expect_find_by_id().returning(|_| {
            Ok(Some(User {
                department_id: Some(9),
                ..stored_user("CorrectHorse1")
            }))
        });

        let service = Authenticator::new(uow_with_users(repo), test_config());
        let claims = Claims {
            sub: 7,
            username: "hr.lena".to_string(),
            role: "HR".to_string(),
            department_id: Some(3),
            iss: TOKEN_ISSUER.to_string(),
            exp: 0,
            iat: 0,
        };

        let principal = service.resolve_principal(claims).await.unwrap();
        assert_eq!(principal.department_id, Some(9));
        assert_eq!(principal.role, Role::Hr);
    }

    #[tokio::test]
    async fn resolve_principal_fails_for_deleted_account() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = Authenticator::new(uow_with_users(repo), test_config());
        let claims = Claims {
            sub: 99,
            username: "gone".to_string(),
            role: "VIEWER".to_string(),
            department_id: None,
            iss: TOKEN_ISSUER.to_string(),
            exp: 0,
            iat: 0,
        };

        let result = service.resolve_principal(claims).await;
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
