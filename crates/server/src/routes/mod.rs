//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Health checks, readiness, and metrics
//! - `teams`: Roster read and full replace
//! - `ocr`: OCR event push and raw relay stream
//! - `overlay`: Per-connection matched decision stream
//! - `matching`: One-shot match preview

pub mod health;
pub mod matching;
pub mod ocr;
pub mod overlay;
pub mod teams;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "Overlay Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Overlay Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/teams",
            "/api/ocr-stream",
            "/api/overlay/stream",
            "/api/match",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
