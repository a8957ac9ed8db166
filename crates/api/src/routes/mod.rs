//! Route tree mounted under `/v1`.

pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Every versioned route.
///
/// ```text
/// GET    /healthcheck      -> health::healthcheck
/// /movies/...              -> movie::router
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/movies", movie::router())
}
