//! Repeated-character collapsing.
//!
//! OCR engines over-segment thin glyphs and emit stuttered runs
//! (`"shaaadow"`, `"ll1l"` after mapping). [`collapse_runs`] folds every
//! maximal run of at least `min_run` identical characters into a single
//! occurrence and leaves shorter runs untouched.
//!
//! ```rust
//! use canonical::collapse_runs;
//!
//! assert_eq!(collapse_runs("shaaadow", 3), "shadow");
//! assert_eq!(collapse_runs("jellyy", 3), "jellyy");
//! ```

/// Collapses maximal runs of `min_run` or more identical characters to one.
pub fn collapse_runs(text: &str, min_run: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let mut run = 1usize;
        while chars.next_if_eq(&ch).is_some() {
            run += 1;
        }
        let keep = if run >= min_run { 1 } else { run };
        out.extend(std::iter::repeat(ch).take(keep));
    }

    out
}
