//! Workspace umbrella crate for roster OCR matching.
//!
//! This crate stitches together name normalization (`canonical`), the roster
//! index (`index`) and the per-session match engine (`matcher`) so callers
//! can replay recorded OCR events against a roster with a single call. The
//! HTTP relay lives in the `overlay-server` crate.

pub mod config;

pub use canonical::{
    has_fuzzy_anchor, normalize_key, Anchor, AnchorFold, AnchorSet, CanonicalError, CharMask,
    CanonicalizeConfig, Canonicalizer, ConfusableRule, ANCHOR_WIDTH,
};
pub use config::{ConfigLoadError, PipelineConfig};
pub use index::{
    IndexEntry, IndexStats, Player, RosterError, RosterIndex, RosterSnapshot, SharedIndex, Team,
    TeamCard,
};
pub use matcher::{
    best_candidate, set_match_metrics, similarity, Candidate, Decision, DecisionStatus,
    LayoutHint, MatchConfig, MatchEngine, MatchError, MatchMetrics, MatchState, OcrEvent,
    OverlayLayout, OverlayMatch,
};

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

/// Errors that stop a replay before the first event.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("canonicalization config rejected: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("match config rejected: {0}")]
    Match(#[from] MatchError),
    #[error("invalid roster: {0}")]
    Roster(#[from] RosterError),
}

/// Outcome of one replayed event.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    /// Zero-based position of the event in the input.
    pub position: usize,
    /// `None` when the payload was malformed and skipped.
    pub decision: Option<Decision>,
}

/// Replay raw OCR payloads, in order, through one fresh engine.
///
/// Malformed payloads produce a step without a decision and leave the engine
/// state untouched, exactly as a live session would.
pub fn replay<'a, I>(
    snapshot: &RosterSnapshot,
    config: &PipelineConfig,
    events: I,
) -> Result<Vec<ReplayStep>, ReplayError>
where
    I: IntoIterator<Item = &'a str>,
{
    config.validate()?;
    snapshot.validate()?;

    let canonicalizer = Arc::new(Canonicalizer::new(config.canonical.clone())?);
    let index = RosterIndex::build(snapshot, canonicalizer);
    let mut engine = MatchEngine::new(config.matcher.clone())?;

    let stats = index.stats();
    tracing::debug!(
        entries = stats.entries,
        players_without_image = stats.players_without_image,
        "replay index built"
    );

    let steps = events
        .into_iter()
        .enumerate()
        .map(|(position, raw)| ReplayStep {
            position,
            decision: engine.process_raw(raw, &index).ok(),
        })
        .collect();
    Ok(steps)
}
