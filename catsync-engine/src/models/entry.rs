//! Track entries and the generation marker

use std::fmt;

use crate::services::result_mapper::TrackItem;

/// Duration recorded for every entry; the catalog only serves previews
pub const PREVIEW_DURATION_SECS: u32 = 30;

/// View partition marker
///
/// Bumped once per search or drill-down. An entry belongs to the active
/// view only while its `last_seen_generation` equals the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Track record in the entry store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Lookup key; never changes once stored
    pub uri: String,
    pub title: String,
    /// Primary artist, then any secondary artists joined with ", "
    pub artist_display: String,
    pub duration_secs: u32,
    /// Stream/preview locator
    pub playback_uri: String,
    pub cover_url: Option<String>,
    /// Catalog web page for the track
    pub external_url: Option<String>,
    pub last_seen_generation: Generation,
}

impl Entry {
    /// Build a new entry from a mapped track
    ///
    /// `cover_override` wins over the track's own album art; album track
    /// listings carry no art of their own.
    pub fn from_track(item: &TrackItem, generation: Generation, cover_override: Option<&str>) -> Self {
        let cover_url = match cover_override {
            Some(cover) => Some(cover.to_string()),
            None => item.cover_url().map(str::to_string),
        };

        Self {
            uri: item.uri.clone(),
            title: item.name.clone(),
            artist_display: item.artist_display(),
            duration_secs: PREVIEW_DURATION_SECS,
            playback_uri: item.playback_uri().to_string(),
            cover_url,
            external_url: item.external_url().map(str::to_string),
            last_seen_generation: generation,
        }
    }
}
