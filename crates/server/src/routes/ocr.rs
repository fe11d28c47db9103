use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures::stream::{self, Stream};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;

/// Push one OCR event to every connected stream.
///
/// Any JSON body is accepted and relayed as compact JSON; the event schema is
/// only enforced by the consumers.
///
/// # Response
///
/// ```json
/// { "ok": true, "clients": 2, "delivered": 2, "dropped": 0 }
/// ```
pub async fn push_event(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> ServerResult<impl IntoResponse> {
    let event: serde_json::Value = serde_json::from_str(&body)?;
    let report = state.relay.publish(Arc::from(event.to_string()));

    Ok(Json(json!({
        "ok": true,
        "clients": report.clients,
        "delivered": report.delivered,
        "dropped": report.dropped,
    })))
}

/// Raw relay stream: every pushed event as an unnamed SSE `data` line.
pub async fn event_stream(
    State(state): State<Arc<ServerState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = state.relay.subscribe();

    let events = stream::unfold(subscription, |mut subscription| async move {
        let payload = subscription.recv().await?;
        Some((Ok(Event::default().data(&*payload)), subscription))
    });

    Sse::new(events).keep_alive(KeepAlive::new().interval(state.config.keep_alive()))
}
