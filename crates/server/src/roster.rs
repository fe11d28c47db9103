//! Roster store: the current snapshot plus its published index.
//!
//! Snapshots arrive from three places (a file at startup, `PUT /api/teams`,
//! and an optional polled URL) and all go through [`RosterStore::replace`],
//! which validates, rebuilds the index off to the side and swaps it in.
//! Overlay sessions keep reading whichever index was current when their
//! event arrived.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use canonical::Canonicalizer;
use index::{RosterIndex, RosterSnapshot, SharedIndex};
use once_cell::sync::Lazy;
use tokio::task::JoinHandle;

use crate::error::ServerResult;
use crate::state::ServerState;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_default()
});

#[derive(Debug)]
pub struct RosterStore {
    snapshot: RwLock<Arc<RosterSnapshot>>,
    index: SharedIndex,
    /// Serializes replacements. Readers never take it.
    writer: Mutex<()>,
}

impl RosterStore {
    pub fn new(canonicalizer: Arc<Canonicalizer>) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(RosterSnapshot::default())),
            index: SharedIndex::empty(canonicalizer),
            writer: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Arc<RosterSnapshot> {
        let guard = self
            .snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&*guard)
    }

    /// Index to match the next event against.
    pub fn index(&self) -> Arc<RosterIndex> {
        self.index.load()
    }

    pub fn generation(&self) -> u64 {
        self.index.generation()
    }

    /// Validate `snapshot`, rebuild the index and publish both.
    ///
    /// The index is built before any reader-visible lock is taken; the
    /// snapshot lock is held only to swap the pair. An identical snapshot
    /// keeps the current index and generation.
    pub fn replace(&self, snapshot: RosterSnapshot) -> ServerResult<Arc<RosterIndex>> {
        snapshot.validate()?;

        let _writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *self.snapshot() == snapshot && self.index.generation() > 0 {
            return Ok(self.index.load());
        }

        let built = RosterIndex::build(&snapshot, self.index.load().canonicalizer_arc());
        let snapshot = Arc::new(snapshot);

        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let published = self.index.publish(built);
        *guard = snapshot;
        Ok(published)
    }

    /// Parse roster JSON and [`replace`](Self::replace) with it.
    pub fn replace_json(&self, raw: &str) -> ServerResult<Arc<RosterIndex>> {
        let snapshot = RosterSnapshot::from_json(raw)?;
        self.replace(snapshot)
    }

    pub fn load_file(&self, path: &Path) -> ServerResult<Arc<RosterIndex>> {
        let raw = std::fs::read_to_string(path)?;
        let index = self.replace_json(&raw)?;
        tracing::info!(path = %path.display(), entries = index.len(), "loaded roster file");
        Ok(index)
    }

    /// Fetch roster JSON from `url` and replace the current snapshot with it.
    pub async fn fetch(&self, url: &str) -> ServerResult<Arc<RosterIndex>> {
        let body = HTTP_CLIENT
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.replace_json(&body)
    }
}

/// Poll `roster_url` in the background, if configured.
///
/// A failed fetch or an invalid roster keeps the previous index.
pub fn spawn_refresher(state: Arc<ServerState>) -> Option<JoinHandle<()>> {
    let url = state.config.roster_url.clone()?;
    let period = state.config.roster_refresh();

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match state.roster.fetch(&url).await {
                Ok(index) => tracing::debug!(
                    url = %url,
                    generation = index.generation(),
                    "roster refresh complete"
                ),
                Err(err) => {
                    metrics::counter!("overlay_roster_refresh_failures_total").increment(1);
                    tracing::warn!(url = %url, error = %err, "roster refresh failed; keeping previous index");
                }
            }
        }
    }))
}
