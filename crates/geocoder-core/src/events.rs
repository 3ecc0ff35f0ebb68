//! Observable events
//!
//! The client and the service can report each step of a lookup on an
//! optional bounded channel. Nothing in the request path depends on it:
//! when no channel is attached, or the channel is full, events are dropped.

use tokio::sync::mpsc;
use tracing::warn;

use crate::format::ResponseFormat;

/// Events emitted by [`crate::GeocoderClient`] and [`crate::GeocoderService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocoderEvent {
    /// Request URL built (key redacted)
    RequestBuilt {
        url: String,
        format: ResponseFormat,
    },

    /// Transport call failed
    TransportFailed {
        transport: String,
        error: String,
    },

    /// Body passed the status check
    ResponseAccepted {
        status: String,
        format: ResponseFormat,
    },

    /// Body was malformed or carried an error status
    ResponseRejected {
        error: String,
    },

    /// Service answered from its cache
    CacheHit {
        cache_key: String,
    },

    /// Service had to ask the API
    CacheMiss {
        cache_key: String,
    },
}

/// Optional sender half of the event channel
#[derive(Debug, Clone, Default)]
pub(crate) struct EventSink {
    tx: Option<mpsc::Sender<GeocoderEvent>>,
}

impl EventSink {
    pub(crate) fn new(tx: mpsc::Sender<GeocoderEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Send without waiting; full or closed channels drop the event
    pub(crate) fn emit(&self, event: GeocoderEvent) {
        let Some(tx) = &self.tx else {
            return;
        };

        if let Err(e) = tx.try_send(event) {
            match e {
                mpsc::error::TrySendError::Full(_) => {
                    warn!("Event channel full, dropping geocoder event");
                }
                mpsc::error::TrySendError::Closed(_) => {
                    tracing::trace!("Event channel closed, dropping geocoder event");
                }
            }
        }
    }
}
