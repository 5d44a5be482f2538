use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::{jwt::JwtKeys, services::verify_token};
use crate::error::AppError;

/// Pulls the token out of `Authorization: Bearer <token>`.
/// Any other scheme counts as no credentials.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth
        .strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Authorization gate for protected routes: 401 without a token, 403 for a bad one.
/// On success the caller's `AuthUser` is available as a request extension.
pub async fn require_auth(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = verify_token(&keys, bearer_token(req.headers()))?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
