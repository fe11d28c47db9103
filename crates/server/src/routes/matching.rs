use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use matcher::{best_candidate, Candidate, Decision, MatchEngine, OcrEvent};
use serde::Serialize;
use std::sync::Arc;

/// Best candidate of a preview, reported even below threshold.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateView {
    pub player_id: String,
    pub player_name: String,
    pub team_name: String,
    /// Normalized token that produced the score.
    pub token: String,
    /// Normalized roster key it was compared with.
    pub key: String,
    pub score: f32,
}

impl From<&Candidate<'_>> for CandidateView {
    fn from(candidate: &Candidate<'_>) -> Self {
        Self {
            player_id: candidate.entry.player_id.clone(),
            player_name: candidate.entry.player_name.clone(),
            team_name: candidate.entry.team.name.clone(),
            token: candidate.token.to_string(),
            key: candidate.entry.key.clone(),
            score: candidate.score,
        }
    }
}

/// Match preview response
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Normalized tokens that survived the length filter, in scan order.
    pub tokens: Vec<String>,
    pub candidate: Option<CandidateView>,
    /// What a fresh overlay session would show for this event.
    pub decision: Decision,
    pub generation: u64,
}

/// Score one OCR event against the current roster without touching any
/// live session.
///
/// Useful when tuning the OCR side: the response shows the normalized
/// tokens, the best candidate and the decision a fresh session would make.
pub async fn preview_match(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> ServerResult<impl IntoResponse> {
    let event = OcrEvent::parse(&body)?;
    let index = state.roster.index();
    let config = &state.config.matcher;

    let tokens = event.normalized_tokens(index.canonicalizer(), config);
    let candidate = best_candidate(&tokens, &index, config)
        .as_ref()
        .map(CandidateView::from);

    let mut engine = MatchEngine::new(config.clone())?;
    let decision = engine.process(&event, &index);

    Ok(Json(PreviewResponse {
        tokens,
        candidate,
        decision,
        generation: index.generation(),
    }))
}
