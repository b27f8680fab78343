//! HTTP surface for the map data.
//!
//! `GET /categories` and `GET /locations` return the stored collections as
//! JSON, both at the root and under `/api`. Every request goes back to the
//! [`DataSource`], so the server holds no state of its own. Failures answer
//! `500` with `{ "error": "..." }`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lohas::{Category, DataSource, LocationCollection, MapError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct ServerState {
    source: Arc<dyn DataSource>,
}

impl ServerState {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }
}

/// Error body for any failed read
pub struct ApiError(MapError);

impl From<MapError> for ApiError {
    fn from(err: MapError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::warn!("request failed: {}", self.0);
        let body = serde_json::json!({ "error": self.0.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub fn build_router(source: Arc<dyn DataSource>) -> Router {
    let data_routes = Router::new()
        .route("/categories", get(categories))
        .route("/locations", get(locations));

    Router::new()
        .merge(data_routes.clone())
        .nest("/api", data_routes)
        .route("/health", get(health))
        .with_state(ServerState::new(source))
        .layer(CorsLayer::permissive())
}

async fn categories(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.source.categories().await?))
}

async fn locations(
    State(state): State<ServerState>,
) -> Result<Json<LocationCollection>, ApiError> {
    Ok(Json(state.source.locations().await?))
}

async fn health() -> &'static str {
    "ok"
}
