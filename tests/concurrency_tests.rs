//! Concurrency and thread safety tests for roster matching

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use common::{names_event, ROSTER_JSON};
use rostermatch::{
    Canonicalizer, DecisionStatus, MatchEngine, RosterIndex, RosterSnapshot, SharedIndex,
};

fn fixture() -> RosterSnapshot {
    RosterSnapshot::from_json(ROSTER_JSON).expect("fixture roster is valid")
}

/// Fixture roster with the Falcons removed.
fn wolves_only() -> RosterSnapshot {
    let mut snapshot = fixture();
    snapshot.teams.retain(|team| team.name == "Wolves");
    snapshot
}

#[test]
fn concurrent_normalization_is_deterministic() {
    let canonicalizer = Arc::new(Canonicalizer::default());
    let inputs = ["SHAD0W", "Bl1tzer", "@ce", "xxxxxyyy", "B0LT"];
    let expected: Vec<String> = inputs.iter().map(|s| canonicalizer.normalize(s)).collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let canonicalizer = Arc::clone(&canonicalizer);
            thread::spawn(move || {
                (0..200)
                    .map(|_| {
                        inputs
                            .iter()
                            .map(|s| canonicalizer.normalize(s))
                            .collect::<Vec<_>>()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for round in handle.join().expect("thread panicked") {
            assert_eq!(round, expected);
        }
    }
}

#[test]
fn independent_engines_share_one_index() {
    let index = Arc::new(RosterIndex::build(
        &fixture(),
        Arc::new(Canonicalizer::default()),
    ));
    let names = ["Shadow", "Vortex", "Blitzer", "B0lt"];

    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let index = Arc::clone(&index);
            let event = names_event(&[name]);
            let name = name.to_string();
            thread::spawn(move || {
                let mut engine = MatchEngine::default();
                for _ in 0..100 {
                    let decision = engine.process_raw(&event, &index).unwrap();
                    assert_eq!(decision.status, DecisionStatus::Matched);
                    assert_eq!(decision.current.unwrap().player_name, name);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("engine thread panicked");
    }
}

#[test]
fn readers_never_observe_partial_rebuilds() {
    let shared = Arc::new(SharedIndex::empty(Arc::new(Canonicalizer::default())));
    shared.rebuild(&fixture());
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let shared = Arc::clone(&shared);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let (full, partial) = (fixture(), wolves_only());
            let mut rebuilds = 0u64;
            while !stop.load(Ordering::Relaxed) {
                let snapshot = if rebuilds % 2 == 0 { &partial } else { &full };
                shared.rebuild(snapshot);
                rebuilds += 1;
            }
            rebuilds
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let event = names_event(&["Shadow"]);
                let mut engine = MatchEngine::default();
                let mut last_generation = 0;
                for _ in 0..500 {
                    let index = shared.load();
                    assert!(index.generation() >= last_generation);
                    last_generation = index.generation();

                    // Either roster is complete: 2 or 4 eligible entries.
                    assert!(matches!(index.len(), 2 | 4), "len {}", index.len());

                    let decision = engine.process_raw(&event, &index).unwrap();
                    if index.len() == 4 {
                        assert_eq!(decision.status, DecisionStatus::Matched);
                    } else {
                        assert_ne!(decision.status, DecisionStatus::Matched);
                    }
                    if let Some(current) = decision.current {
                        assert_eq!(current.player_name, "Shadow");
                    }
                }
            })
        })
        .collect();

    for reader in readers {
        reader.join().expect("reader panicked");
    }
    stop.store(true, Ordering::Relaxed);
    let rebuilds = writer.join().expect("writer panicked");
    assert_eq!(shared.generation(), rebuilds + 1);
}
