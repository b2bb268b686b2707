//! View events and EventBus
//!
//! The search engine never touches widgets. It describes what the view
//! should do as [`ViewEvent`]s and broadcasts them; whatever renders the
//! library view (a GUI, a terminal front end, a test) subscribes.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// View event types
///
/// Events are broadcast via EventBus and can be serialized for
/// transmission to an out-of-process UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewEvent {
    /// Active track list replaced by an empty one scoped to `generation`
    ViewReset {
        generation: u64,
    },

    /// Container panel shown or hidden
    ContainerPanel {
        visible: bool,
    },

    /// Container panel column title changed
    ContainerTitle {
        title: String,
    },

    /// Entry became visible at `generation`
    EntryVisible {
        generation: u64,
        uri: String,
        title: String,
        artist: String,
    },

    /// Container appended to the container panel
    ContainerAdded {
        name: String,
        kind: String,
        id: String,
    },

    /// Catalog request finished and its results were applied
    ResultsApplied {
        generation: u64,
        entries: usize,
        containers: usize,
    },

    /// Cover art for the playing entry, keyed by title and artist
    CoverArt {
        title: String,
        artist: String,
        cover_url: String,
    },
}

/// Broadcast channel for view events
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ViewEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events
    ///
    /// # Examples
    ///
    /// ```
    /// use catsync_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(&self, event: ViewEvent) -> Result<usize, broadcast::error::SendError<ViewEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: ViewEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
