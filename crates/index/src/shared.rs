use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use canonical::Canonicalizer;

use crate::build::RosterIndex;
use crate::roster::RosterSnapshot;

/// Published roster index, swapped whole on every roster refresh.
///
/// Readers take an `Arc` to the current index and work on it without holding
/// any lock; a rebuild constructs the replacement off to the side and only
/// takes the write lock to replace the pointer. A reader therefore sees either
/// the old index or the new one, never a partial build.
#[derive(Debug)]
pub struct SharedIndex {
    current: RwLock<Arc<RosterIndex>>,
    generation: AtomicU64,
}

impl SharedIndex {
    pub fn new(initial: RosterIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            generation: AtomicU64::new(0),
        }
    }

    /// Empty index using `canonicalizer` for future builds.
    pub fn empty(canonicalizer: Arc<Canonicalizer>) -> Self {
        Self::new(RosterIndex::empty(canonicalizer))
    }

    /// Current index.
    pub fn load(&self) -> Arc<RosterIndex> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&*guard)
    }

    /// Generation of the most recent publish.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Replace the current index with a fully built one.
    pub fn publish(&self, mut index: RosterIndex) -> Arc<RosterIndex> {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        index.generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let published = Arc::new(index);
        *guard = Arc::clone(&published);
        drop(guard);

        let stats = published.stats();
        tracing::info!(
            generation = published.generation(),
            entries = stats.entries,
            teams = stats.teams,
            players = stats.players,
            teams_without_image = stats.teams_without_image,
            players_without_image = stats.players_without_image,
            players_with_short_key = stats.players_with_short_key,
            "published roster index"
        );
        if published.is_empty() {
            tracing::warn!(
                generation = published.generation(),
                "roster index has no eligible entries; every event will report no match"
            );
        }
        published
    }

    /// Build an index from `snapshot` with the current normalizer and publish it.
    pub fn rebuild(&self, snapshot: &RosterSnapshot) -> Arc<RosterIndex> {
        let canonicalizer = self.load().canonicalizer_arc();
        let index = RosterIndex::build(snapshot, canonicalizer);
        self.publish(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Player, Team};
    use std::thread;

    fn roster(player_name: &str) -> RosterSnapshot {
        RosterSnapshot::new(vec![Team {
            id: "t1".into(),
            name: "Falcons".into(),
            slot_number: Some(1),
            image: Some("https://cdn/t1.png".into()),
            color: None,
            players: vec![Player {
                id: "p1".into(),
                name: player_name.into(),
                image: Some("https://cdn/p1.png".into()),
                position: 1,
            }],
        }])
    }

    #[test]
    fn publish_bumps_generation() {
        let shared = SharedIndex::empty(Arc::new(Canonicalizer::default()));
        assert_eq!(shared.load().generation(), 0);

        let first = shared.rebuild(&roster("Shadow"));
        let second = shared.rebuild(&roster("Vortex"));
        assert_eq!(first.generation(), 1);
        assert_eq!(second.generation(), 2);
        assert_eq!(shared.generation(), 2);
        assert_eq!(shared.load().entries()[0].player_name, "Vortex");
    }

    #[test]
    fn held_reference_survives_swap() {
        let shared = SharedIndex::empty(Arc::new(Canonicalizer::default()));
        shared.rebuild(&roster("Shadow"));
        let held = shared.load();

        shared.rebuild(&roster("Vortex"));
        assert_eq!(held.entries()[0].player_name, "Shadow");
        assert_eq!(shared.load().entries()[0].player_name, "Vortex");
    }

    #[test]
    fn readers_never_observe_partial_index() {
        let shared = Arc::new(SharedIndex::empty(Arc::new(Canonicalizer::default())));
        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..200 {
                    let name = if i % 2 == 0 { "Shadow" } else { "Vortex" };
                    shared.rebuild(&roster(name));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let index = shared.load();
                        // Either the initial empty index or a complete one-entry build.
                        assert!(index.len() == 0 || index.len() == 1);
                        assert_eq!(index.len(), index.stats().entries);
                    }
                })
            })
            .collect();

        writer.join().expect("writer thread");
        for reader in readers {
            reader.join().expect("reader thread");
        }
        assert_eq!(shared.generation(), 200);
    }
}
