use std::time::Instant;

use index::RosterIndex;

use crate::event::OcrEvent;
use crate::layout::OverlayLayout;
use crate::metrics::metrics_recorder;
use crate::search::best_candidate;
use crate::types::{Decision, MatchConfig, MatchError, OverlayMatch};


/// Hysteresis state of one overlay session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MatchState {
    #[default]
    NoMatch,
    /// A match is displayed; `misses` counts consecutive events without a
    /// qualifying candidate since it was set.
    Stable { current: OverlayMatch, misses: u32 },
}

/// Per-session matcher: turns a stream of OCR events into display decisions.
///
/// A fresh candidate at or above the threshold replaces the displayed match
/// immediately; when no candidate qualifies the previous match is held for
/// up to `hold_misses - 1` events and then cleared. Each session owns its own
/// engine and feeds it sequentially. The roster index is passed per event so
/// a rebuilt index takes effect on the next event.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: MatchConfig,
    state: MatchState,
    layout: OverlayLayout,
}

impl MatchEngine {
    /// Validate `config` and start in [`MatchState::NoMatch`] with the default layout.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            config,
            state: MatchState::NoMatch,
            layout: OverlayLayout::default(),
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Layout after every hint merged so far.
    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    /// Forget the current match. The merged layout is kept.
    pub fn reset(&mut self) {
        self.state = MatchState::NoMatch;
    }

    /// Parse and process a raw payload.
    ///
    /// A malformed payload is reported as an error and leaves the engine
    /// untouched, layout included.
    pub fn process_raw(&mut self, raw: &str, index: &RosterIndex) -> Result<Decision, MatchError> {
        match OcrEvent::parse(raw) {
            Ok(event) => Ok(self.process(&event, index)),
            Err(err) => {
                if let Some(metrics) = metrics_recorder() {
                    metrics.record_malformed();
                }
                tracing::debug!(error = %err, "dropping malformed OCR event");
                Err(err)
            }
        }
    }

    /// Process one event against `index`.
    pub fn process(&mut self, event: &OcrEvent, index: &RosterIndex) -> Decision {
        let started = Instant::now();

        let tokens = event.normalized_tokens(index.canonicalizer(), &self.config);

        if let Some(hint) = &event.ui_position {
            self.layout.merge(hint);
        }

        let best = best_candidate(&tokens, index, &self.config);
        let best_score = best.as_ref().map(|c| c.score);
        let decision = match best.filter(|c| c.score >= self.config.match_threshold) {
            Some(candidate) => {
                let current = candidate.to_match();
                self.state = MatchState::Stable {
                    current: current.clone(),
                    misses: 0,
                };
                Decision::matched(current)
            }
            None => self.miss(best_score),
        };

        tracing::debug!(
            status = decision.status.as_str(),
            misses = decision.misses,
            score = ?decision.score,
            tokens = tokens.len(),
            generation = index.generation(),
            "processed OCR event"
        );
        if let Some(metrics) = metrics_recorder() {
            metrics.record_event(decision.status, started.elapsed(), tokens.len());
        }

        decision
    }

    fn miss(&mut self, best_score: Option<f32>) -> Decision {
        let hold = self.config.hold_misses;
        if let MatchState::Stable { current, misses } = &mut self.state {
            *misses += 1;
            if *misses < hold {
                return Decision::held(current.clone(), *misses, best_score);
            }
        }
        self.state = MatchState::NoMatch;
        Decision::no_match(best_score)
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            config: MatchConfig::default(),
            state: MatchState::NoMatch,
            layout: OverlayLayout::default(),
        }
    }
}
