use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use tracing::instrument;

use super::{
    claims::AuthUser,
    dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse},
    middleware::require_auth,
    services,
};
use crate::{error::AppResult, state::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn users_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

pub fn me_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(payload) = payload?;
    let user = services::register(state.users.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let (token, user) = services::login(state.users.as_ref(), &state.jwt, payload).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token,
        user,
    }))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<PublicUser>>> {
    Ok(Json(services::list_users(state.users.as_ref()).await?))
}

#[instrument(skip(state, who), fields(user_id = %who.id))]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(who): Extension<AuthUser>,
) -> AppResult<Json<PublicUser>> {
    Ok(Json(services::current_user(state.users.as_ref(), &who).await?))
}
