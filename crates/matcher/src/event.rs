//! OCR event wire format.
//!
//! Every field is optional and unknown fields are ignored:
//!
//! ```json
//! { "parsed": { "players": [{ "name": "Shad0w" }] },
//!   "raw_text": ["SHAD0W", "12 KILLS"],
//!   "ui_position": { "PlayerImgTop": 900 } }
//! ```
//!
//! A payload that is not JSON, or whose present fields have the wrong type,
//! is malformed.

use canonical::Canonicalizer;
use serde::{Deserialize, Serialize};

use crate::layout::LayoutHint;
use crate::types::{MatchConfig, MatchError};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OcrEvent {
    #[serde(default)]
    pub parsed: Option<ParsedFrame>,
    #[serde(default)]
    pub raw_text: Option<Vec<String>>,
    #[serde(default)]
    pub ui_position: Option<LayoutHint>,
}

/// Structured guesses the OCR process extracted from a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedFrame {
    #[serde(default)]
    pub players: Option<Vec<PlayerGuess>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerGuess {
    #[serde(default)]
    pub name: Option<String>,
}

impl OcrEvent {
    pub fn parse(raw: &str) -> Result<Self, MatchError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Candidate strings in scan order: parsed player names, then raw lines.
    ///
    /// Guesses without a name are skipped.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        let names = self
            .parsed
            .iter()
            .filter_map(|p| p.players.as_ref())
            .flatten()
            .filter_map(|g| g.name.as_deref());
        let lines = self.raw_text.iter().flatten().map(String::as_str);
        names.chain(lines)
    }

    /// [`tokens`](Self::tokens) normalized with `canonicalizer`, keeping
    /// only lengths `config` accepts.
    pub fn normalized_tokens(
        &self,
        canonicalizer: &Canonicalizer,
        config: &MatchConfig,
    ) -> Vec<String> {
        self.tokens()
            .map(|raw| canonicalizer.normalize(raw))
            .filter(|token| config.accepts_token(token))
            .collect()
    }
}
