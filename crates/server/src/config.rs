use canonical::CanonicalizeConfig;
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Time allowed for a handler to produce response headers, in seconds.
    /// Streaming bodies are not bounded by it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Events queued per stream subscriber before further events are dropped for it.
    #[serde(default = "default_relay_buffer")]
    pub relay_buffer: usize,

    /// Interval between SSE keep-alive comments, in seconds.
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    /// Roster JSON loaded at startup.
    #[serde(default)]
    pub roster_file: Option<PathBuf>,

    /// Roster endpoint polled for updates.
    #[serde(default)]
    pub roster_url: Option<String>,

    /// Poll interval for `roster_url`, in seconds.
    #[serde(default = "default_roster_refresh_secs")]
    pub roster_refresh_secs: u64,

    /// Matching thresholds shared by every overlay session.
    #[serde(default)]
    pub matcher: MatchConfig,

    /// Name normalization rules.
    #[serde(default)]
    pub canonical: CanonicalizeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            relay_buffer: default_relay_buffer(),
            keep_alive_secs: default_keep_alive_secs(),
            roster_file: None,
            roster_url: None,
            roster_refresh_secs: default_roster_refresh_secs(),
            matcher: MatchConfig::default(),
            canonical: CanonicalizeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `overlay.{toml,yaml,json}`
    /// file and `OVERLAY_SERVER__*` environment variables, in increasing
    /// precedence.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("overlay").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("OVERLAY_SERVER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.matcher.validate()?;
        self.canonical.validate()?;
        if self.relay_buffer == 0 {
            anyhow::bail!("relay_buffer must be at least 1");
        }
        if self.roster_url.is_some() && self.roster_refresh_secs == 0 {
            anyhow::bail!("roster_refresh_secs must be at least 1 when roster_url is set");
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    pub fn roster_refresh(&self) -> Duration {
        Duration::from_secs(self.roster_refresh_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_relay_buffer() -> usize {
    64
}

fn default_keep_alive_secs() -> u64 {
    15
}

fn default_roster_refresh_secs() -> u64 {
    30
}
