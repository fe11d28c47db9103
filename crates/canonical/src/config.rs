//! Configuration types for OCR-tolerant name normalization.
//!
//! This module defines [`CanonicalizeConfig`], which controls how display
//! names and OCR tokens are folded into normalized keys, and which character
//! pairs the anchor filter treats as look-alikes.
//!
//! # Versioning
//!
//! Thresholds downstream (match score, hold window) are tuned against the
//! output of this normalization. Any change that alters keys for existing
//! inputs must bump `version` so that operators can tell which tuning applies.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert_eq!(config.min_run, 3);
//! assert!(!config.normalize_unicode);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Maps every character in `from` onto the single canonical `to` character.
///
/// Rules are applied after lowercasing, so sources are written in lowercase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfusableRule {
    /// Characters OCR tends to produce in place of `to`.
    pub from: String,
    /// Canonical representative; must be a lowercase ASCII letter or digit.
    pub to: char,
}

impl ConfusableRule {
    pub fn new(from: impl Into<String>, to: char) -> Self {
        Self {
            from: from.into(),
            to,
        }
    }
}

/// Configuration for the normalization pipeline.
///
/// The pipeline is, in order: optional NFKC, lowercase, confusable mapping,
/// run collapsing, stripping of everything outside `[a-z0-9]`.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": false,
///   "min_run": 3,
///   "confusables": [{ "from": "@d", "to": "q" }, { "from": "0", "to": "o" }],
///   "lookalikes": [["8", "b"], ["0", "o"], ["1", "l"]]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Version of the normalization behavior. Must be >= 1.
    pub version: u32,

    /// Apply Unicode NFKC before lowercasing.
    ///
    /// Off by default so keys match the ones produced by the existing tuning
    /// data; enabling it folds full-width and ligature forms into ASCII and
    /// therefore raises recall on stylized broadcast fonts.
    pub normalize_unicode: bool,

    /// OCR confusion classes folded onto one representative character.
    pub confusables: Vec<ConfusableRule>,

    /// Runs of at least this many identical characters collapse to one.
    ///
    /// OCR engines often stutter on thin glyphs (`"lll"` for `"l"`). Runs
    /// shorter than this are kept as-is, so genuine double letters survive.
    pub min_run: usize,

    /// Symmetric look-alike pairs used by the anchor admissibility filter.
    ///
    /// Pairs are merged transitively into equivalence classes.
    pub lookalikes: Vec<(char, char)>,
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: false,
            confusables: default_confusables(),
            min_run: 3,
            lookalikes: default_lookalikes(),
        }
    }
}

impl CanonicalizeConfig {
    /// Validate the configuration.
    ///
    /// Confusable targets must be fixed points of the table (a target may not
    /// itself be remapped elsewhere), otherwise normalizing a key twice would
    /// not be stable.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.min_run < 2 {
            return Err(CanonicalError::InvalidConfig(
                "min_run must be >= 2".into(),
            ));
        }

        for rule in &self.confusables {
            if !is_key_char(rule.to) {
                return Err(CanonicalError::InvalidConfig(format!(
                    "confusable target {:?} must be a lowercase ASCII letter or digit",
                    rule.to
                )));
            }
            if rule.from.is_empty() {
                return Err(CanonicalError::InvalidConfig(format!(
                    "confusable rule for {:?} has no source characters",
                    rule.to
                )));
            }
            if let Some(upper) = rule.from.chars().find(|c| c.is_uppercase()) {
                return Err(CanonicalError::InvalidConfig(format!(
                    "confusable source {upper:?} is uppercase; rules apply after lowercasing"
                )));
            }
        }

        for rule in &self.confusables {
            for other in &self.confusables {
                if other.to != rule.to && other.from.contains(rule.to) {
                    return Err(CanonicalError::InvalidConfig(format!(
                        "confusable target {:?} is remapped to {:?}",
                        rule.to, other.to
                    )));
                }
                if other.to != rule.to {
                    if let Some(shared) = rule.from.chars().find(|c| other.from.contains(*c)) {
                        return Err(CanonicalError::InvalidConfig(format!(
                            "confusable source {shared:?} maps to both {:?} and {:?}",
                            rule.to, other.to
                        )));
                    }
                }
            }
        }

        for &(a, b) in &self.lookalikes {
            if !is_key_char(a) || !is_key_char(b) {
                return Err(CanonicalError::InvalidConfig(format!(
                    "look-alike pair ({a:?}, {b:?}) must use lowercase ASCII letters or digits"
                )));
            }
        }

        Ok(())
    }
}

/// Characters that may appear in a normalized key.
pub(crate) fn is_key_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit()
}

fn default_confusables() -> Vec<ConfusableRule> {
    vec![
        ConfusableRule::new("@d", 'q'),
        ConfusableRule::new("0", 'o'),
        ConfusableRule::new("1il7", 'l'),
        ConfusableRule::new("5", 's'),
    ]
}

fn default_lookalikes() -> Vec<(char, char)> {
    vec![('8', 'b'), ('0', 'o'), ('1', 'l')]
}
