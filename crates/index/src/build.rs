use std::sync::Arc;

use canonical::{AnchorSet, Canonicalizer, CharMask, ANCHOR_WIDTH};
use serde::Serialize;

use crate::roster::RosterSnapshot;

/// Team fields the overlay needs once a player is matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamCard {
    pub id: String,
    pub name: String,
    pub slot_number: Option<u32>,
    pub color: Option<String>,
    pub image: String,
}

/// One eligible (team, player) pair, pre-normalized for lookups.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Shared by every entry of the same team.
    pub team: Arc<TeamCard>,
    pub player_id: String,
    pub player_name: String,
    pub player_image: String,
    pub position: u8,
    /// Normalized player name.
    pub key: String,
    /// Folded 4-byte windows of `key`.
    pub anchors: AnchorSet,
    /// Characters occurring in `key`.
    pub chars: CharMask,
}

/// Counts gathered while building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub teams: usize,
    pub players: usize,
    pub entries: usize,
    pub teams_without_image: usize,
    pub players_without_image: usize,
    pub players_with_short_key: usize,
}

/// Flat, read-only lookup view of a roster snapshot.
///
/// Entries keep roster order (team order, then player order). Built whole;
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct RosterIndex {
    entries: Vec<IndexEntry>,
    canonicalizer: Arc<Canonicalizer>,
    stats: IndexStats,
    pub(crate) generation: u64,
}

impl RosterIndex {
    /// Index with no entries; every lookup against it misses.
    pub fn empty(canonicalizer: Arc<Canonicalizer>) -> Self {
        Self {
            entries: Vec::new(),
            canonicalizer,
            stats: IndexStats::default(),
            generation: 0,
        }
    }

    /// Build an index from `snapshot`.
    ///
    /// Skips teams without an image, players without an image, and players
    /// whose normalized name is shorter than one anchor window.
    pub fn build(snapshot: &RosterSnapshot, canonicalizer: Arc<Canonicalizer>) -> Self {
        let mut entries = Vec::with_capacity(snapshot.player_count());
        let mut stats = IndexStats {
            teams: snapshot.teams.len(),
            players: snapshot.player_count(),
            ..IndexStats::default()
        };

        for team in &snapshot.teams {
            let Some(team_image) = team.image.as_deref().filter(|_| team.has_image()) else {
                stats.teams_without_image += 1;
                continue;
            };
            let card = Arc::new(TeamCard {
                id: team.id.clone(),
                name: team.name.clone(),
                slot_number: team.slot_number,
                color: team.color.clone(),
                image: team_image.to_string(),
            });

            for player in &team.players {
                let Some(player_image) = player.image.as_deref().filter(|_| player.has_image())
                else {
                    stats.players_without_image += 1;
                    continue;
                };

                let key = canonicalizer.normalize(&player.name);
                if key.len() < ANCHOR_WIDTH {
                    stats.players_with_short_key += 1;
                    continue;
                }

                let anchors = AnchorSet::from_key(&key, canonicalizer.fold());
                let chars = CharMask::from_key(&key);
                entries.push(IndexEntry {
                    team: Arc::clone(&card),
                    player_id: player.id.clone(),
                    player_name: player.name.clone(),
                    player_image: player_image.to_string(),
                    position: player.position,
                    key,
                    anchors,
                    chars,
                });
            }
        }

        stats.entries = entries.len();
        Self {
            entries,
            canonicalizer,
            stats,
            generation: 0,
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalizer the keys were built with; tokens must use the same one.
    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    pub fn canonicalizer_arc(&self) -> Arc<Canonicalizer> {
        Arc::clone(&self.canonicalizer)
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Publication counter; 0 until published through a `SharedIndex`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `token` may reach `min_score` against `entry`.
    ///
    /// Admits when any of these holds:
    /// - a window of `token` fuzzily agrees with an anchor of the key
    /// - every character of `token` occurs in the key
    /// - the share of `token` characters found in the key, over the longer
    ///   length, is at least `min_score`
    ///
    /// Every pair that scores `min_score` or more is admitted. An equal or
    /// contained token passes the second check. A token containing the key
    /// carries the key's first window (keys are at least one window long).
    /// The coverage score is exactly the third check.
    pub fn admits(&self, token: &str, entry: &IndexEntry, min_score: f32) -> bool {
        if entry.chars.covers_all(token) {
            return true;
        }
        let longest = token.chars().count().max(entry.key.chars().count());
        let coverage = entry.chars.covered(token) as f32 / longest as f32;
        coverage >= min_score || entry.anchors.overlaps(token, self.canonicalizer.fold())
    }
}
