//! View collaborator seam
//!
//! The session drives the library view only through [`ViewRenderer`].
//! [`EventBusView`] turns those calls into [`ViewEvent`]s on the shared
//! EventBus so any front end can subscribe.

use catsync_common::events::{EventBus, ViewEvent};

use crate::models::{Container, Entry, Generation};

/// What the engine asks of the library view
pub trait ViewRenderer: Send + Sync {
    /// Replace the active track list with an empty one scoped to `generation`
    fn reset_entries(&self, generation: Generation);

    /// Show or hide the container panel
    fn set_container_panel_visible(&self, visible: bool);

    /// Set the container panel column title
    fn set_container_title(&self, title: &str);

    /// Entry (re)stamped at the view's generation
    fn entry_visible(&self, entry: &Entry);

    /// Container appended to the panel
    fn container_added(&self, container: &Container);

    /// Request results fully applied
    fn results_applied(&self, generation: Generation, entries: usize, containers: usize);

    /// Store `cover_url` as the album art for `title` by `artist`
    fn cover_art(&self, title: &str, artist: &str, cover_url: &str);
}

/// ViewRenderer broadcasting on an EventBus
#[derive(Clone)]
pub struct EventBusView {
    event_bus: EventBus,
}

impl EventBusView {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

impl ViewRenderer for EventBusView {
    fn reset_entries(&self, generation: Generation) {
        self.event_bus.emit_lossy(ViewEvent::ViewReset {
            generation: generation.value(),
        });
    }

    fn set_container_panel_visible(&self, visible: bool) {
        self.event_bus.emit_lossy(ViewEvent::ContainerPanel { visible });
    }

    fn set_container_title(&self, title: &str) {
        self.event_bus.emit_lossy(ViewEvent::ContainerTitle {
            title: title.to_string(),
        });
    }

    fn entry_visible(&self, entry: &Entry) {
        self.event_bus.emit_lossy(ViewEvent::EntryVisible {
            generation: entry.last_seen_generation.value(),
            uri: entry.uri.clone(),
            title: entry.title.clone(),
            artist: entry.artist_display.clone(),
        });
    }

    fn container_added(&self, container: &Container) {
        self.event_bus.emit_lossy(ViewEvent::ContainerAdded {
            name: container.name.clone(),
            kind: container.kind.name().to_string(),
            id: container.id.clone(),
        });
    }

    fn results_applied(&self, generation: Generation, entries: usize, containers: usize) {
        self.event_bus.emit_lossy(ViewEvent::ResultsApplied {
            generation: generation.value(),
            entries,
            containers,
        });
    }

    fn cover_art(&self, title: &str, artist: &str, cover_url: &str) {
        self.event_bus.emit_lossy(ViewEvent::CoverArt {
            title: title.to_string(),
            artist: artist.to_string(),
            cover_url: cover_url.to_string(),
        });
    }
}
