//! Overlay Server - HTTP relay and live roster matching for broadcast overlays
//!
//! An external OCR process pushes recognized on-screen text to this server;
//! overlay pages subscribe and receive either the raw events or, on the
//! decision stream, the roster player each event resolves to.
//!
//! # Features
//!
//! - **Relay**: fan-out of OCR events to every connected SSE subscriber,
//!   with bounded per-subscriber queues
//! - **Matching**: one independent match engine per overlay connection
//! - **Roster**: full-replace updates via HTTP, a startup file, or a polled URL;
//!   the index is rebuilt and swapped atomically
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with roster index generation
//! - `GET /metrics` - Prometheus metrics
//! - `GET /api/teams` - Current roster
//! - `PUT /api/teams` - Replace the roster
//! - `POST /api/ocr-stream` - Push one OCR event
//! - `GET /api/ocr-stream` - Raw OCR event stream (SSE)
//! - `GET /api/overlay/stream` - Matched decision stream (SSE)
//! - `POST /api/match` - Match preview for one event

pub mod config;
pub mod error;
pub mod middleware;
pub mod relay;
pub mod roster;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use relay::{OcrRelay, PublishReport, RelaySubscription};
pub use roster::RosterStore;
pub use server::{build_router, start_server};
pub use state::ServerState;
