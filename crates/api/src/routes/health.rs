use axum::extract::State;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::Envelope;
use crate::state::AppState;

/// Static facts about the running service.
#[derive(Serialize)]
pub struct SystemInfo {
    /// `development`, `staging` or `production`.
    pub environment: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /v1/healthcheck -- reports that the service is up.
///
/// Does not touch the database, so it stays cheap enough for load-balancer
/// probes.
async fn healthcheck(State(state): State<AppState>) -> AppResult<Envelope> {
    let info = SystemInfo {
        environment: state.config.env.as_str(),
        version: env!("CARGO_PKG_VERSION"),
    };

    Envelope::ok()
        .with("status", "available")?
        .with("system_info", &info)
}

/// Mount the health check route.
pub fn router() -> Router<AppState> {
    Router::new().route("/healthcheck", get(healthcheck))
}
