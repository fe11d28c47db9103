//! OCR-tolerant name normalization for roster matching.
//!
//! Display names from the roster and text tokens coming out of an OCR engine
//! are folded into the same *normalized key* space before they are compared.
//! The folding favors recall over precision: it is lossy, one-directional and
//! never reconstructs the original name.
//!
//! ## What we do
//!
//! - Lowercasing (optionally preceded by Unicode NFKC)
//! - Mapping of OCR-confusable characters onto one representative
//!   (`@`/`d` → `q`, `0` → `o`, `1`/`i`/`l`/`7` → `l`, `5` → `s`)
//! - Collapsing stuttered runs of 3+ identical characters
//! - Stripping everything outside `[a-z0-9]`
//! - Folding look-alike pairs (`8`/`b`, `0`/`o`, `1`/`l`) for 4-byte anchor
//!   windows used as a cheap candidate filter
//! - A 36-bit [`CharMask`] per key, so character coverage of a token can be
//!   bounded without scoring it
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config, same key.
//!
//! ```rust
//! use canonical::{normalize_key, Canonicalizer};
//!
//! assert_eq!(normalize_key("Shad0w"), "shaqow");
//!
//! let canon = Canonicalizer::default();
//! let key = canon.normalize("SHADOW!!!");
//! assert_eq!(key, normalize_key("shad0w"));
//! ```

mod anchor;
mod charset;
mod config;
mod error;
mod normalize;
mod runs;

pub use crate::anchor::{has_fuzzy_anchor, Anchor, AnchorFold, AnchorSet, ANCHOR_WIDTH};
pub use crate::charset::CharMask;
pub use crate::config::{CanonicalizeConfig, ConfusableRule};
pub use crate::error::CanonicalError;
pub use crate::normalize::{normalize_key, Canonicalizer};
pub use crate::runs::collapse_runs;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_and_ocr_meet_in_key_space() {
        let canon = Canonicalizer::default();
        let roster = canon.normalize("Bolt");
        let ocr = canon.normalize("B0LT");
        assert_eq!(roster, ocr);

        let anchors = AnchorSet::from_key(&roster, canon.fold());
        assert!(anchors.overlaps(&canon.normalize("80lt"), canon.fold()));
    }

    #[test]
    fn empty_and_symbol_only_inputs_are_total() {
        let canon = Canonicalizer::default();
        assert_eq!(canon.normalize(""), "");
        assert_eq!(canon.normalize("@@@"), "q");
        assert_eq!(canon.normalize("#$%^"), "");
    }
}
