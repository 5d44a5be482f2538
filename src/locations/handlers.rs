use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use tracing::{debug, instrument};

use super::{
    dto::{RecentQuery, SendLocationRequest, SendLocationResponse},
    repo_types::LocationSample,
    services,
};
use crate::{
    auth::{middleware::require_auth, AuthUser},
    error::AppResult,
    state::AppState,
};

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/send-location", post(send_location))
}

/// `GET /locations`, gated only when the deployment asks for it.
pub fn read_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new().route("/locations", get(list_locations));
    if state.config.locations_require_auth {
        router.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
    } else {
        router
    }
}

#[instrument(skip(state, payload))]
pub async fn send_location(
    State(state): State<AppState>,
    payload: Result<Json<SendLocationRequest>, JsonRejection>,
) -> AppResult<Json<SendLocationResponse>> {
    let Json(payload) = payload?;
    let location =
        services::submit(state.locations.as_ref(), payload.latitude, payload.longitude).await?;
    Ok(Json(SendLocationResponse {
        message: "Location saved".into(),
        location,
    }))
}

#[instrument(skip(state, viewer, query))]
pub async fn list_locations(
    State(state): State<AppState>,
    viewer: Option<Extension<AuthUser>>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> AppResult<Json<Vec<LocationSample>>> {
    let Query(query) = query?;
    if let Some(Extension(who)) = &viewer {
        debug!(user_id = %who.id, "authenticated locations read");
    }
    Ok(Json(
        services::list_recent(state.locations.as_ref(), query.limit).await?,
    ))
}
