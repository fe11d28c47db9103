// Metrics hooks for the `matcher` crate.
//
// Callers install a global `MatchMetrics` implementation via [`set_match_metrics`];
// every `MatchEngine` then reports per-event latency and outcome. Instrumentation
// stays decoupled from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::DecisionStatus;

/// Metrics observer for match engines.
pub trait MatchMetrics: Send + Sync {
    /// Record one processed event.
    ///
    /// `status` is the resulting decision status, `latency` covers
    /// normalization and candidate search, and `token_count` is the number of
    /// normalized tokens that survived the length filter.
    fn record_event(&self, status: DecisionStatus, latency: Duration, token_count: usize);

    /// Record an event dropped because its payload was malformed.
    fn record_malformed(&self) {}
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// Typically called once during service startup so every engine shares the
/// same backend.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
