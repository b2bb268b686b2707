//! Catalog payload decoding
//!
//! Pure functions turning raw response bytes into [`TrackItem`]s and
//! [`Container`]s. Each request kind has its own typed schema; the decode
//! shape is picked from the [`SearchKind`] instead of probing the payload.
//!
//! Failure policy:
//! - Unparseable payload: logged, mapped to no items
//! - Individual item that does not decode: skipped, the rest still map
//! - Container item whose `type` is not artist/album: skipped silently

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::models::{Container, ContainerKind, SearchKind, TrackShape};

/// Image list position of the mid-resolution cover
pub const COVER_IMAGE_INDEX: usize = 2;

/// Track as delivered by the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct TrackItem {
    pub uri: String,
    /// Preview stream; null for tracks without a preview
    #[serde(default)]
    pub preview_url: Option<String>,
    pub name: String,
    /// Artists in credit order
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    /// Absent on album track listings
    #[serde(default)]
    pub album: Option<AlbumRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

impl TrackItem {
    /// Primary artist with secondary artists appended as ", "-joined suffix
    pub fn artist_display(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Cover from the track's own album art, if the image list reaches it
    pub fn cover_url(&self) -> Option<&str> {
        self.album.as_ref().and_then(|album| cover_from_images(&album.images))
    }

    /// Preview locator, falling back to the track uri
    pub fn playback_uri(&self) -> &str {
        self.preview_url.as_deref().unwrap_or(&self.uri)
    }

    pub fn external_url(&self) -> Option<&str> {
        self.external_urls.spotify.as_deref()
    }
}

/// Container search result item before kind validation
#[derive(Debug, Clone, Deserialize)]
struct ContainerItem {
    name: String,
    #[serde(rename = "type")]
    item_type: String,
    id: String,
    #[serde(default)]
    external_urls: ExternalUrls,
}

/// Item that decodes to `None` instead of failing its whole array
#[derive(Debug)]
struct Lenient<T>(Option<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match serde_json::from_value(value) {
            Ok(item) => Ok(Lenient(Some(item))),
            Err(e) => {
                warn!(error = %e, "Skipping catalog item that does not decode");
                Ok(Lenient(None))
            }
        }
    }
}

fn collect<T>(items: Vec<Lenient<T>>) -> Vec<T> {
    items.into_iter().filter_map(|item| item.0).collect()
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// `{"tracks": {"items": [...]}}`
#[derive(Debug, Deserialize)]
struct TrackSearchPayload {
    tracks: Page<Lenient<TrackItem>>,
}

/// `{"tracks": [...]}`
#[derive(Debug, Deserialize)]
struct TopTracksPayload {
    tracks: Vec<Lenient<TrackItem>>,
}

/// `{"items": [...]}`
#[derive(Debug, Deserialize)]
struct AlbumTracksPayload {
    items: Vec<Lenient<TrackItem>>,
}

/// `{"artists": {"items": [...]}}` or `{"albums": {"items": [...]}}`
#[derive(Debug, Deserialize)]
struct ContainerSearchPayload {
    #[serde(default)]
    artists: Option<Page<Lenient<ContainerItem>>>,
    #[serde(default)]
    albums: Option<Page<Lenient<ContainerItem>>>,
}

/// Album metadata, read only for its images
#[derive(Debug, Deserialize)]
struct AlbumPayload {
    #[serde(default)]
    images: Vec<Image>,
}

fn cover_from_images(images: &[Image]) -> Option<&str> {
    images.get(COVER_IMAGE_INDEX).and_then(|image| image.url.as_deref())
}

pub fn decode_search_tracks(raw: &[u8]) -> Result<Vec<TrackItem>, serde_json::Error> {
    let payload: TrackSearchPayload = serde_json::from_slice(raw)?;
    Ok(collect(payload.tracks.items))
}

pub fn decode_top_tracks(raw: &[u8]) -> Result<Vec<TrackItem>, serde_json::Error> {
    let payload: TopTracksPayload = serde_json::from_slice(raw)?;
    Ok(collect(payload.tracks))
}

pub fn decode_album_tracks(raw: &[u8]) -> Result<Vec<TrackItem>, serde_json::Error> {
    let payload: AlbumTracksPayload = serde_json::from_slice(raw)?;
    Ok(collect(payload.items))
}

/// Decode the track list of a payload produced by a `kind` request
///
/// Unparseable payloads map to no items.
pub fn map_tracks(raw: &[u8], kind: SearchKind) -> Vec<TrackItem> {
    let decoded = match kind.track_shape() {
        TrackShape::SearchResults => decode_search_tracks(raw),
        TrackShape::TopTracks => decode_top_tracks(raw),
        TrackShape::AlbumTracks => decode_album_tracks(raw),
    };

    match decoded {
        Ok(tracks) => {
            debug!(kind = %kind, count = tracks.len(), "Mapped catalog tracks");
            tracks
        }
        Err(e) => {
            warn!(kind = %kind, error = %e, "Unparseable track payload, treating as empty");
            Vec::new()
        }
    }
}

/// Decode containers from a search for `kind`
///
/// Items whose catalog `type` is not artist or album are skipped.
pub fn map_containers(raw: &[u8], kind: ContainerKind) -> Vec<Container> {
    let payload: ContainerSearchPayload = match serde_json::from_slice(raw) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(kind = %kind, error = %e, "Unparseable container payload, treating as empty");
            return Vec::new();
        }
    };

    let page = match kind {
        ContainerKind::Artist => payload.artists,
        ContainerKind::Album => payload.albums,
    };
    let Some(page) = page else {
        warn!(kind = %kind, "Container payload has no result page");
        return Vec::new();
    };

    collect(page.items)
        .into_iter()
        .filter_map(|item| match item.item_type.parse::<ContainerKind>() {
            Ok(kind) => Some(Container {
                name: item.name,
                kind,
                id: item.id,
                external_url: item.external_urls.spotify.unwrap_or_default(),
            }),
            Err(_) => {
                debug!(item_type = %item.item_type, name = %item.name, "Skipping non-container item");
                None
            }
        })
        .collect()
}

/// Extract an album's cover from its metadata payload
///
/// A payload that does not parse, or whose image list is too short, has
/// no cover.
pub fn map_album_cover(raw: &[u8]) -> Option<String> {
    match serde_json::from_slice::<AlbumPayload>(raw) {
        Ok(payload) => cover_from_images(&payload.images).map(str::to_string),
        Err(e) => {
            warn!(error = %e, "Unparseable album payload, no cover");
            None
        }
    }
}
