//! # Roster Index
//!
//! Normalized, pre-processed view of a tournament roster, optimized for
//! repeated fuzzy lookups of OCR tokens.
//!
//! ## Core Types
//!
//! - [`RosterSnapshot`]: the full team/player roster as returned by the roster
//!   store, with [`RosterSnapshot::validate`] for slot and position rules.
//! - [`RosterIndex`]: one [`IndexEntry`] per eligible (team, player) pair,
//!   carrying the player's normalized key and its folded anchor set.
//! - [`SharedIndex`]: the published index. Rebuilds are whole and swapped in
//!   atomically; readers hold an `Arc` to whichever index was current when
//!   they looked.
//!
//! ## Eligibility
//!
//! A team or player without an image reference cannot be overlaid and is left
//! out of the index, as is any player whose normalized name is shorter than
//! one anchor window (4 characters).
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use canonical::Canonicalizer;
//! use index::{RosterSnapshot, SharedIndex};
//!
//! let roster = RosterSnapshot::from_json(r#"[{
//!     "id": "t1", "teamName": "Falcons", "teamImage": "https://cdn/t1.png",
//!     "players": [{ "id": "p1", "playerName": "Shadow",
//!                   "playerImage": "https://cdn/p1.png", "position": 1 }]
//! }]"#).expect("valid roster");
//!
//! let shared = SharedIndex::empty(Arc::new(Canonicalizer::default()));
//! let index = shared.rebuild(&roster);
//! assert_eq!(index.len(), 1);
//! assert_eq!(index.entries()[0].key, "shaqow");
//! ```

mod build;
mod error;
mod roster;
mod shared;

pub use crate::build::{IndexEntry, IndexStats, RosterIndex, TeamCard};
pub use crate::error::RosterError;
pub use crate::roster::{Player, RosterSnapshot, Team, MAX_PLAYERS, MAX_SLOTS};
pub use crate::shared::SharedIndex;
