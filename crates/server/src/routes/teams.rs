use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Current roster snapshot, in the same shape `PUT` accepts.
pub async fn get_teams(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let snapshot = state.roster.snapshot();
    Json(snapshot.as_ref().clone())
}

/// Replace the whole roster.
///
/// The body is validated before anything changes; an invalid roster is
/// rejected with 400 and the previous index stays live.
///
/// # Response
///
/// ```json
/// { "ok": true, "generation": 3, "stats": { "entries": 12, "...": 0 } }
/// ```
pub async fn put_teams(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> ServerResult<impl IntoResponse> {
    let index = state.roster.replace_json(&body)?;
    Ok(Json(json!({
        "ok": true,
        "generation": index.generation(),
        "stats": index.stats(),
    })))
}
