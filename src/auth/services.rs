use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    claims::AuthUser,
    dto::{LoginRequest, PublicUser, RegisterRequest},
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::UserStore,
};
use crate::error::{AppError, AppResult};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn register(users: &dyn UserStore, req: RegisterRequest) -> AppResult<PublicUser> {
    let username = req.username.trim().to_string();
    let email = normalize_email(&req.email);

    if username.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::validation(
            "username, email and password are required",
        ));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::validation("Invalid email"));
    }

    // Skips the hashing cost for the common case; the store still decides races.
    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password = req.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("join hash task")??;

    let user = users.create(&username, &email, &hash).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user.into())
}

pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> AppResult<(String, PublicUser)> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("email and password are required"));
    }

    let Some(user) = users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::NotFound("User not found".into()));
    };

    let password = req.password;
    let stored = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .context("join verify task")??;
    if !ok {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = keys.sign(user.id, &user.email)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((token, user.into()))
}

/// `None` means no credentials were presented at all.
pub fn verify_token(keys: &JwtKeys, token: Option<&str>) -> AppResult<AuthUser> {
    let token = token.ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;
    match keys.verify(token) {
        Ok(claims) => Ok(claims.into()),
        Err(e) => {
            warn!(error = %e, "invalid or expired token");
            Err(AppError::Forbidden("Invalid or expired token".into()))
        }
    }
}

/// The token may outlive its user; that is a 404, not a crash.
pub async fn current_user(users: &dyn UserStore, who: &AuthUser) -> AppResult<PublicUser> {
    users
        .find_by_id(who.id)
        .await?
        .map(PublicUser::from)
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

pub async fn list_users(users: &dyn UserStore) -> AppResult<Vec<PublicUser>> {
    Ok(users.list().await?.into_iter().map(PublicUser::from).collect())
}
