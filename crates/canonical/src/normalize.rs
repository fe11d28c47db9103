use std::borrow::Cow;
use std::sync::OnceLock;

use fxhash::FxHashMap;
use unicode_normalization::UnicodeNormalization;

use crate::anchor::AnchorFold;
use crate::config::{is_key_char, CanonicalizeConfig};
use crate::error::CanonicalError;
use crate::runs::collapse_runs;

/// Compiled normalization pipeline.
///
/// Holds the confusable lookup and look-alike fold derived from a validated
/// [`CanonicalizeConfig`]. Roster names and OCR tokens must go through the
/// same `Canonicalizer` for comparisons to be symmetric.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    config: CanonicalizeConfig,
    confusables: FxHashMap<char, char>,
    fold: AnchorFold,
}

impl Canonicalizer {
    /// Validate `config` and compile it.
    pub fn new(config: CanonicalizeConfig) -> Result<Self, CanonicalError> {
        config.validate()?;
        Ok(Self::compile(config))
    }

    fn compile(config: CanonicalizeConfig) -> Self {
        let mut confusables = FxHashMap::default();
        for rule in &config.confusables {
            for source in rule.from.chars() {
                confusables.insert(source, rule.to);
            }
        }
        let fold = AnchorFold::from_pairs(&config.lookalikes);
        Self {
            config,
            confusables,
            fold,
        }
    }

    pub fn config(&self) -> &CanonicalizeConfig {
        &self.config
    }

    /// Look-alike fold shared by anchor sets and token windows.
    pub fn fold(&self) -> &AnchorFold {
        &self.fold
    }

    /// Normalize `text` into a comparison key.
    ///
    /// Total and deterministic. Steps: optional NFKC, lowercase, confusable
    /// mapping, run collapsing, stripping to `[a-z0-9]`. Stripping removes
    /// whitespace, so the key is already trimmed; runs are collapsed a second
    /// time because stripping can join them (`"aa-a"`), which keeps
    /// `normalize(normalize(x)) == normalize(x)`.
    pub fn normalize(&self, text: &str) -> String {
        let source: Cow<'_, str> = if self.config.normalize_unicode {
            Cow::Owned(text.nfkc().collect())
        } else {
            Cow::Borrowed(text)
        };

        let mapped: String = source
            .chars()
            .flat_map(char::to_lowercase)
            .map(|ch| self.confusables.get(&ch).copied().unwrap_or(ch))
            .collect();

        let collapsed = collapse_runs(&mapped, self.config.min_run);
        let stripped: String = collapsed.chars().filter(|&ch| is_key_char(ch)).collect();

        collapse_runs(&stripped, self.config.min_run)
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::compile(CanonicalizeConfig::default())
    }
}

/// Normalize `text` with the default configuration.
pub fn normalize_key(text: &str) -> String {
    static DEFAULT: OnceLock<Canonicalizer> = OnceLock::new();
    DEFAULT.get_or_init(Canonicalizer::default).normalize(text)
}
