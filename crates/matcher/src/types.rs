use index::IndexEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning knobs for the per-event matcher and its hold window.
///
/// Defaults reproduce the thresholds the overlay was tuned with; changing
/// them changes which OCR misreads are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum similarity for a candidate to become the stable match.
    pub match_threshold: f32,
    /// Consecutive misses after which a stable match is cleared.
    pub hold_misses: u32,
    /// Shortest normalized token considered.
    pub min_token_len: usize,
    /// Longest normalized token considered.
    pub max_token_len: usize,
    /// Score only entries sharing a fuzzy anchor with the token. Disabling
    /// this scores every entry.
    pub anchor_filter: bool,
}

impl MatchConfig {
    pub(crate) fn default_match_threshold() -> f32 {
        0.75
    }

    pub(crate) fn default_hold_misses() -> u32 {
        5
    }

    /// Check ranges; returns the first violation found.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.match_threshold > 0.0 && self.match_threshold <= 1.0) {
            return Err(MatchError::InvalidConfig(format!(
                "match_threshold must be in (0, 1], got {}",
                self.match_threshold
            )));
        }
        if self.hold_misses == 0 {
            return Err(MatchError::InvalidConfig(
                "hold_misses must be at least 1".into(),
            ));
        }
        if self.min_token_len == 0 {
            return Err(MatchError::InvalidConfig(
                "min_token_len must be at least 1".into(),
            ));
        }
        if self.min_token_len > self.max_token_len {
            return Err(MatchError::InvalidConfig(format!(
                "min_token_len ({}) exceeds max_token_len ({})",
                self.min_token_len, self.max_token_len
            )));
        }
        Ok(())
    }

    /// Whether a normalized token's length falls inside the accepted range.
    pub fn accepts_token(&self, token: &str) -> bool {
        (self.min_token_len..=self.max_token_len).contains(&token.len())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            match_threshold: Self::default_match_threshold(),
            hold_misses: Self::default_hold_misses(),
            min_token_len: 3,
            max_token_len: 25,
            anchor_filter: true,
        }
    }
}

/// Errors surfaced by the matcher.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("malformed OCR event: {0}")]
    MalformedEvent(#[from] serde_json::Error),
}

/// What the overlay renders for the current player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlayMatch {
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    pub team_name: String,
    pub team_image: String,
    pub player_image: String,
    pub color: Option<String>,
    /// Similarity of the token that produced this match.
    pub score: f32,
}

/// How a decision was reached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    /// A candidate cleared the threshold on this event.
    Matched,
    /// No candidate cleared it, but the previous match is still inside the hold window.
    Held,
    NoMatch,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Matched => "matched",
            DecisionStatus::Held => "held",
            DecisionStatus::NoMatch => "no_match",
        }
    }
}

/// Output of processing one OCR event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Decision {
    /// Match to display; `None` means hide the overlay.
    #[serde(rename = "match")]
    pub current: Option<OverlayMatch>,
    pub status: DecisionStatus,
    /// Consecutive misses so far; 0 after a fresh match.
    pub misses: u32,
    /// Best admissible score seen on this event, even below threshold.
    pub score: Option<f32>,
}

impl Decision {
    pub(crate) fn matched(current: OverlayMatch) -> Self {
        let score = Some(current.score);
        Self {
            current: Some(current),
            status: DecisionStatus::Matched,
            misses: 0,
            score,
        }
    }

    pub(crate) fn held(current: OverlayMatch, misses: u32, score: Option<f32>) -> Self {
        Self {
            current: Some(current),
            status: DecisionStatus::Held,
            misses,
            score,
        }
    }

    pub(crate) fn no_match(score: Option<f32>) -> Self {
        Self {
            current: None,
            status: DecisionStatus::NoMatch,
            misses: 0,
            score,
        }
    }

    pub fn is_match(&self) -> bool {
        self.current.is_some()
    }
}

/// Best scoring (token, entry) pair of one event.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub entry: &'a IndexEntry,
    /// Normalized token that produced `score`.
    pub token: &'a str,
    pub score: f32,
}

impl Candidate<'_> {
    pub fn to_match(&self) -> OverlayMatch {
        let entry = self.entry;
        OverlayMatch {
            player_id: entry.player_id.clone(),
            player_name: entry.player_name.clone(),
            team_id: entry.team.id.clone(),
            team_name: entry.team.name.clone(),
            team_image: entry.team.image.clone(),
            player_image: entry.player_image.clone(),
            color: entry.team.color.clone(),
            score: self.score,
        }
    }
}
