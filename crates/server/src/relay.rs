//! OCR event relay.
//!
//! Every pushed event is fanned out to each connected stream subscriber.
//! Subscribers register when their stream opens and are removed when the
//! [`RelaySubscription`] is dropped, which axum does as soon as the client
//! disconnects. Each subscriber has a bounded queue: when it is full the
//! event is dropped for that subscriber only, so one slow consumer never
//! stalls the producer or the other consumers.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

/// Serialized event text, shared between subscribers.
pub type RelayPayload = Arc<str>;

/// Outcome of one publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    /// Subscribers connected after closed ones were pruned.
    pub clients: usize,
    pub delivered: usize,
    /// Subscribers whose queue was full.
    pub dropped: usize,
    /// Closed subscribers removed during this publish.
    pub pruned: usize,
}

#[derive(Debug)]
struct RelayInner {
    clients: DashMap<Uuid, mpsc::Sender<RelayPayload>>,
    buffer: usize,
}

/// Registry of connected stream subscribers.
#[derive(Debug, Clone)]
pub struct OcrRelay {
    inner: Arc<RelayInner>,
}

impl OcrRelay {
    /// `buffer` is the per-subscriber queue length; clamped to at least 1.
    pub fn new(buffer: usize) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                clients: DashMap::new(),
                buffer: buffer.max(1),
            }),
        }
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> RelaySubscription {
        let (tx, rx) = mpsc::channel(self.inner.buffer);
        let id = Uuid::new_v4();
        self.inner.clients.insert(id, tx);

        let clients = self.client_count();
        metrics::gauge!("overlay_relay_clients").set(clients as f64);
        tracing::info!(client_id = %id, clients, "relay client connected");

        RelaySubscription {
            id,
            receiver: rx,
            relay: self.clone(),
        }
    }

    /// Queue `payload` for every subscriber without waiting.
    pub fn publish(&self, payload: RelayPayload) -> PublishReport {
        let mut report = PublishReport::default();
        let mut closed = Vec::new();

        for client in self.inner.clients.iter() {
            match client.value().try_send(Arc::clone(&payload)) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    report.dropped += 1;
                    tracing::debug!(client_id = %client.key(), "relay queue full, dropping event");
                }
                Err(TrySendError::Closed(_)) => closed.push(*client.key()),
            }
        }

        // Shard guards from the iteration above are released; removing while
        // iterating would deadlock.
        for id in &closed {
            if self.inner.clients.remove(id).is_some() {
                report.pruned += 1;
            }
        }

        report.clients = self.client_count();
        if report.dropped > 0 {
            metrics::counter!("overlay_relay_dropped_total").increment(report.dropped as u64);
        }
        if report.pruned > 0 {
            metrics::gauge!("overlay_relay_clients").set(report.clients as f64);
        }
        metrics::counter!("overlay_relay_events_total").increment(1);
        report
    }

    pub fn client_count(&self) -> usize {
        self.inner.clients.len()
    }

    fn remove(&self, id: &Uuid) {
        if self.inner.clients.remove(id).is_some() {
            let clients = self.client_count();
            metrics::gauge!("overlay_relay_clients").set(clients as f64);
            tracing::info!(client_id = %id, clients, "relay client disconnected");
        }
    }
}

/// Receiving end of one subscriber. Dropping it unregisters the subscriber.
#[derive(Debug)]
pub struct RelaySubscription {
    id: Uuid,
    receiver: mpsc::Receiver<RelayPayload>,
    relay: OcrRelay,
}

impl RelaySubscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next queued event; `None` once the relay has removed this subscriber.
    pub async fn recv(&mut self) -> Option<RelayPayload> {
        self.receiver.recv().await
    }
}

impl Drop for RelaySubscription {
    fn drop(&mut self) {
        self.relay.remove(&self.id);
    }
}
