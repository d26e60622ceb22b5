//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{policy, Principal};
use crate::errors::AppError;

/// JWT authentication middleware.
///
/// Extracts and verifies the bearer token, resolves the principal
/// (re-reading account attributes from the store), and injects it into
/// the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;
    let principal = state.auth_service.resolve_principal(claims).await?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Require the admin role, returns Forbidden otherwise.
pub fn require_admin(principal: &Principal) -> Result<(), AppError> {
    if policy::can_manage_users(principal) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
