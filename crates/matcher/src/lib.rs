//! # Roster Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of the normalizer (`canonical`) and the roster
//! index (`index`). It turns a stream of OCR events from a live broadcast
//! into one decision per event: which roster player the overlay should show,
//! or nothing.
//!
//! Per event the engine:
//! - collects tokens (parsed player-name guesses first, then raw text lines),
//!   normalizes them and drops those outside the configured length range;
//! - merges any layout hint into the session layout;
//! - finds the best (token, entry) pair, skipping entries that share no
//!   fuzzy anchor with the token;
//! - applies hysteresis: a candidate at or above the threshold replaces the
//!   displayed match immediately, while misses hold the previous match for a
//!   short window before clearing it.
//!
//! ## Core Types
//!
//! - [`MatchEngine`]: per-session state machine ([`MatchState`]).
//! - [`MatchConfig`]: threshold, hold window and token length bounds.
//! - [`OcrEvent`]: wire format of one OCR event.
//! - [`Decision`] / [`OverlayMatch`]: what the overlay renders.
//! - [`OverlayLayout`] / [`LayoutHint`]: element positions and their updates.
//! - [`best_candidate`] and [`similarity`]: the stateless search and score.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use canonical::Canonicalizer;
//! use index::{RosterIndex, RosterSnapshot};
//! use matcher::{DecisionStatus, MatchEngine};
//!
//! let snapshot = RosterSnapshot::from_json(r#"[{
//!     "id": "t1", "teamName": "Falcons", "teamImage": "t1.png",
//!     "players": [{ "id": "p1", "playerName": "Shadow",
//!                   "playerImage": "p1.png", "position": 1 }]
//! }]"#).unwrap();
//! let index = RosterIndex::build(&snapshot, Arc::new(Canonicalizer::default()));
//!
//! let mut engine = MatchEngine::default();
//! let decision = engine
//!     .process_raw(r#"{"parsed":{"players":[{"name":"SHAD0W"}]}}"#, &index)
//!     .unwrap();
//! assert_eq!(decision.status, DecisionStatus::Matched);
//! assert_eq!(decision.current.unwrap().player_name, "Shadow");
//! ```

mod engine;
mod event;
mod layout;
mod metrics;
mod score;
mod search;
mod types;

pub use engine::{MatchEngine, MatchState};
pub use event::{OcrEvent, ParsedFrame, PlayerGuess};
pub use layout::{LayoutHint, OverlayLayout};
pub use metrics::{set_match_metrics, MatchMetrics};
pub use score::similarity;
pub use search::best_candidate;
pub use types::{Candidate, Decision, DecisionStatus, MatchConfig, MatchError, OverlayMatch};
