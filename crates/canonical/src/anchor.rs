//! Anchor windows and look-alike folding.
//!
//! An anchor is a [`ANCHOR_WIDTH`]-byte window of a normalized key. Two
//! windows "fuzzily agree" when every aligned pair of bytes is identical or
//! belongs to the same look-alike class (`8`/`b`, `0`/`o`, `1`/`l` by default).
//!
//! Instead of comparing every token window against every anchor pairwise,
//! both sides are folded through [`AnchorFold`], which replaces each byte with
//! the representative of its class. Fuzzy agreement of two windows is then
//! plain equality of their folded forms, so an [`AnchorSet`] is a hash set and
//! the overlap test is one lookup per token window.
//!
//! Keys are expected to be normalized (ASCII `[a-z0-9]`); windows are taken
//! over bytes.

use fxhash::FxHashSet;

/// Width of an anchor window, in bytes.
pub const ANCHOR_WIDTH: usize = 4;

/// A folded anchor window.
pub type Anchor = [u8; ANCHOR_WIDTH];

/// Byte-level look-alike folding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorFold {
    map: [u8; 256],
}

impl AnchorFold {
    /// Folding table where every byte is only equivalent to itself.
    pub fn identity() -> Self {
        let mut map = [0u8; 256];
        for (slot, byte) in map.iter_mut().zip(0u8..=255) {
            *slot = byte;
        }
        Self { map }
    }

    /// Build a folding table from symmetric look-alike pairs.
    ///
    /// Pairs are merged transitively: `(a, b)` and `(b, c)` put `a`, `b` and
    /// `c` in one class. Non-ASCII characters are ignored.
    pub fn from_pairs(pairs: &[(char, char)]) -> Self {
        let mut fold = Self::identity();
        for &(a, b) in pairs {
            if !a.is_ascii() || !b.is_ascii() {
                continue;
            }
            let ra = fold.map[a as usize];
            let rb = fold.map[b as usize];
            if ra == rb {
                continue;
            }
            let (keep, merged) = (ra.min(rb), ra.max(rb));
            for slot in fold.map.iter_mut() {
                if *slot == merged {
                    *slot = keep;
                }
            }
        }
        fold
    }

    /// Class representative for `byte`.
    #[inline]
    pub fn fold_byte(&self, byte: u8) -> u8 {
        self.map[byte as usize]
    }

    /// Whether two bytes are identical or look-alikes.
    #[inline]
    pub fn equivalent(&self, a: u8, b: u8) -> bool {
        self.fold_byte(a) == self.fold_byte(b)
    }

    /// Folded windows of `key`, left to right. Empty if `key` is shorter
    /// than [`ANCHOR_WIDTH`].
    pub fn windows<'a>(&'a self, key: &'a str) -> impl Iterator<Item = Anchor> + 'a {
        key.as_bytes().windows(ANCHOR_WIDTH).map(move |w| {
            let mut anchor = [0u8; ANCHOR_WIDTH];
            for (dst, &src) in anchor.iter_mut().zip(w) {
                *dst = self.fold_byte(src);
            }
            anchor
        })
    }
}

impl Default for AnchorFold {
    fn default() -> Self {
        Self::identity()
    }
}

/// Folded anchors of one normalized key.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    anchors: FxHashSet<Anchor>,
}

impl AnchorSet {
    pub fn from_key(key: &str, fold: &AnchorFold) -> Self {
        Self {
            anchors: fold.windows(key).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// True iff some window of `token` fuzzily agrees with one of the anchors.
    ///
    /// `fold` must be the table the set was built with.
    pub fn overlaps(&self, token: &str, fold: &AnchorFold) -> bool {
        !self.anchors.is_empty() && fold.windows(token).any(|w| self.anchors.contains(&w))
    }
}

/// Pairwise reference form of [`AnchorSet::overlaps`].
///
/// Compares every window of `token` with every window of `key` position by
/// position. Quadratic; kept for diagnostics and as the oracle in tests.
pub fn has_fuzzy_anchor(token: &str, key: &str, fold: &AnchorFold) -> bool {
    let a = token.as_bytes();
    let b = key.as_bytes();
    if a.len() < ANCHOR_WIDTH || b.len() < ANCHOR_WIDTH {
        return false;
    }

    a.windows(ANCHOR_WIDTH).any(|sub| {
        b.windows(ANCHOR_WIDTH).any(|target| {
            sub.iter()
                .zip(target)
                .all(|(&ca, &cb)| fold.equivalent(ca, cb))
        })
    })
}
