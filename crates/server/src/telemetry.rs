// Prometheus wiring for the server.
//
// The recorder is process-global, so it is installed once and every
// `ServerState` shares the same handle. Installing it also routes the
// matcher's `MatchMetrics` hook into the `metrics` facade.
use std::sync::Arc;
use std::time::Duration;

use matcher::{set_match_metrics, DecisionStatus, MatchMetrics};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::error::{ServerError, ServerResult};

/// Forwards match engine observations to the `metrics` facade.
#[derive(Debug, Default)]
pub struct FacadeMatchMetrics;

impl MatchMetrics for FacadeMatchMetrics {
    fn record_event(&self, status: DecisionStatus, latency: Duration, token_count: usize) {
        metrics::counter!("overlay_match_events_total", "status" => status.as_str()).increment(1);
        metrics::histogram!("overlay_match_latency_seconds").record(latency.as_secs_f64());
        metrics::histogram!("overlay_match_tokens").record(token_count as f64);
    }

    fn record_malformed(&self) {
        metrics::counter!("overlay_match_malformed_total").increment(1);
    }
}

/// Install the global Prometheus recorder on first call and return its handle.
pub fn install_prometheus() -> ServerResult<PrometheusHandle> {
    static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

    HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|err| ServerError::Config(format!("metrics recorder: {err}")))?;
            set_match_metrics(Some(Arc::new(FacadeMatchMetrics)));
            Ok(handle)
        })
        .cloned()
}
