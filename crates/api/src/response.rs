//! Response envelope for API handlers.
//!
//! Every successful response is a JSON object whose top-level keys name the
//! payload, e.g. `{ "movie": {...} }` or `{ "movies": [...] }`. Build one with
//! [`Envelope`] instead of ad-hoc `serde_json::json!` so the status code and
//! the encoding failure path are handled the same way everywhere.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppResult;

/// A keyed bag of top-level response data plus the status to send it with.
///
/// # Example
///
/// ```ignore
/// Ok(Envelope::ok().with("movie", &movie)?)
/// ```
#[derive(Debug, Clone)]
pub struct Envelope {
    status: StatusCode,
    body: Map<String, Value>,
}

impl Envelope {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Map::new(),
        }
    }

    /// Shorthand for a `200 OK` envelope.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Encode `value` under `key`, replacing any earlier value for that key.
    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> AppResult<Self> {
        let value = serde_json::to_value(value)?;
        self.body.insert(key.to_string(), value);
        Ok(self)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, Json(Value::Object(self.body))).into_response()
    }
}
