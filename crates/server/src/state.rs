use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::relay::OcrRelay;
use crate::roster::RosterStore;
use crate::telemetry::install_prometheus;
use canonical::Canonicalizer;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Connected OCR stream subscribers
    pub relay: OcrRelay,

    /// Current roster and its index
    pub roster: RosterStore,

    /// Prometheus renderer, when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state
    ///
    /// Validates `config` and loads `roster_file` when configured; a bad
    /// file fails startup rather than serving an empty roster. Every overlay
    /// session builds its engine from the validated `config.matcher`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config
            .validate()
            .map_err(|err| ServerError::Config(err.to_string()))?;

        let canonicalizer = Arc::new(Canonicalizer::new(config.canonical.clone())?);
        let roster = RosterStore::new(canonicalizer);
        if let Some(path) = &config.roster_file {
            roster.load_file(path)?;
        }

        let metrics = if config.metrics_enabled {
            Some(install_prometheus()?)
        } else {
            None
        };

        Ok(Self {
            relay: OcrRelay::new(config.relay_buffer),
            roster,
            metrics,
            config: Arc::new(config),
        })
    }
}
