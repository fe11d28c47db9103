use index::RosterIndex;

use crate::score::similarity;
use crate::types::{Candidate, MatchConfig};

/// Best (token, entry) pair across `tokens` and the entries of `index`.
///
/// Tokens must already be normalized with `index.canonicalizer()`. The scan
/// is token-major over entries in roster order and only a strictly greater
/// score replaces the best, so ties keep the first pair seen. A pair scoring
/// `0.0` is never reported.
///
/// With `config.anchor_filter` set, entries that [`RosterIndex::admits`]
/// rules out for `config.match_threshold` are skipped without scoring. The
/// filter never drops a pair that would reach the threshold, so it changes
/// only which below-threshold candidate is reported.
pub fn best_candidate<'a>(
    tokens: &'a [String],
    index: &'a RosterIndex,
    config: &MatchConfig,
) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;
    let floor = config.match_threshold;

    for token in tokens {
        for entry in index.entries() {
            if config.anchor_filter && !index.admits(token, entry, floor) {
                continue;
            }
            let score = similarity(token, &entry.key);
            let best_score = best.as_ref().map_or(0.0, |c| c.score);
            if score > best_score {
                best = Some(Candidate {
                    entry,
                    token: token.as_str(),
                    score,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonical::Canonicalizer;
    use index::{Player, RosterSnapshot, Team};
    use std::sync::Arc;

    fn index(names: &[&str]) -> RosterIndex {
        let players = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player {
                id: format!("p{i}"),
                name: (*name).into(),
                image: Some(format!("https://cdn/p{i}.png")),
                position: i as u8 + 1,
            })
            .collect();
        let snapshot = RosterSnapshot::new(vec![Team {
            id: "t1".into(),
            name: "Falcons".into(),
            slot_number: Some(1),
            image: Some("https://cdn/t1.png".into()),
            color: None,
            players,
        }]);
        RosterIndex::build(&snapshot, Arc::new(Canonicalizer::default()))
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| canonical::normalize_key(t)).collect()
    }

    fn filtered() -> MatchConfig {
        MatchConfig::default()
    }

    fn unfiltered() -> MatchConfig {
        MatchConfig {
            anchor_filter: false,
            ..MatchConfig::default()
        }
    }

    #[test]
    fn finds_exact_player() {
        let idx = index(&["Shadow", "Vortex"]);
        let toks = tokens(&["kills 12", "VORTEX"]);
        let best = best_candidate(&toks, &idx, &filtered()).unwrap();
        assert_eq!(best.entry.player_name, "Vortex");
        assert_eq!(best.score, 1.0);
        assert_eq!(best.token, "vortex");
    }

    #[test]
    fn ties_keep_first_token() {
        // Both tokens equal a key exactly; the earlier token wins.
        let idx = index(&["Shadow", "Vortex"]);
        let toks = tokens(&["vortex", "shadow"]);
        let best = best_candidate(&toks, &idx, &filtered()).unwrap();
        assert_eq!(best.entry.player_name, "Vortex");
    }

    #[test]
    fn anchor_filter_keeps_scrambled_tokens() {
        // No shared window, but every character is in the key.
        let idx = index(&["Abce"]);
        let toks = tokens(&["ecba"]);
        let best = best_candidate(&toks, &idx, &filtered()).unwrap();
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn anchor_filter_keeps_unlisted_substitutions() {
        let idx = index(&["Shadow"]);
        let toks = tokens(&["shaxow"]);
        let best = best_candidate(&toks, &idx, &filtered()).unwrap();
        assert!((best.score - 5.0 / 6.0).abs() < 1e-6);
        assert_eq!(best.entry.player_name, "Shadow");
    }

    #[test]
    fn anchor_filter_skips_unrelated_entries() {
        let idx = index(&["Vortex"]);
        let toks = tokens(&["shaxow"]);
        assert!(best_candidate(&toks, &idx, &filtered()).is_none());

        // Unfiltered, the shared 'x' and 'o' still score.
        let best = best_candidate(&toks, &idx, &unfiltered()).unwrap();
        assert!(best.score < 0.75);
    }

    #[test]
    fn filter_agrees_with_full_scan_at_threshold() {
        let idx = index(&["Shadow", "Vortex", "Blitzer", "Abce"]);
        let toks = tokens(&["shaxow", "ecba", "abc", "vortexx", "bl1tz", "zzzz"]);
        for token in &toks {
            let single = std::slice::from_ref(token);
            let full = best_candidate(single, &idx, &unfiltered())
                .filter(|c| c.score >= 0.75)
                .map(|c| (c.entry.player_id.clone(), c.score));
            let fast = best_candidate(single, &idx, &filtered())
                .filter(|c| c.score >= 0.75)
                .map(|c| (c.entry.player_id.clone(), c.score));
            assert_eq!(full, fast, "token={token}");
        }
    }

    #[test]
    fn below_threshold_is_still_reported() {
        let idx = index(&["Shadowfax"]);
        // Shares the "shaq" anchor but covers little of the key.
        let toks = tokens(&["shaqzy"]);
        let best = best_candidate(&toks, &idx, &filtered()).unwrap();
        assert!(best.score < 0.75);
    }

    #[test]
    fn empty_inputs_have_no_candidate() {
        let idx = index(&["Shadow"]);
        assert!(best_candidate(&[], &idx, &filtered()).is_none());

        let empty = RosterIndex::empty(Arc::new(Canonicalizer::default()));
        assert!(best_candidate(&tokens(&["shadow"]), &empty, &filtered()).is_none());
    }
}
