use crate::error::ServerResult;
use crate::relay::RelaySubscription;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use matcher::{Decision, MatchEngine, OverlayLayout};
use serde::Serialize;
use std::sync::Arc;

/// One `decision` SSE event.
#[derive(Debug, Serialize)]
pub struct DecisionFrame<'a> {
    #[serde(flatten)]
    pub decision: &'a Decision,
    pub layout: &'a OverlayLayout,
    /// Index generation the event was matched against.
    pub generation: u64,
}

struct OverlaySession {
    subscription: RelaySubscription,
    engine: MatchEngine,
    state: Arc<ServerState>,
}

impl OverlaySession {
    /// Wait for the next well-formed event and match it.
    ///
    /// Malformed events are skipped without touching the engine. `None` once
    /// the relay drops this subscriber.
    async fn next_frame(&mut self) -> Option<Result<Event, axum::Error>> {
        loop {
            let payload = self.subscription.recv().await?;
            let index = self.state.roster.index();
            let Ok(decision) = self.engine.process_raw(&payload, &index) else {
                continue;
            };
            let frame = DecisionFrame {
                decision: &decision,
                layout: self.engine.layout(),
                generation: index.generation(),
            };
            return Some(Event::default().event("decision").json_data(&frame));
        }
    }
}

/// Matched decision stream.
///
/// Each connection owns an independent engine that starts in no-match and is
/// dropped with the connection, so a reconnect starts fresh.
pub async fn decision_stream(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
    let keep_alive = state.config.keep_alive();
    let engine = MatchEngine::new(state.config.matcher.clone())?;
    let session = OverlaySession {
        subscription: state.relay.subscribe(),
        engine,
        state,
    };
    tracing::debug!(client_id = %session.subscription.id(), "overlay session opened");

    let frames = stream::unfold(session, |mut session| async move {
        let frame = session.next_frame().await?;
        Some((frame, session))
    });

    Ok(Sse::new(frames).keep_alive(KeepAlive::new().interval(keep_alive)))
}
