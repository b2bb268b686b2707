//! Catalog search kinds
//!
//! Each kind carries everything that used to be looked up by name: the
//! search endpoint, the shape tracks arrive in, whether results group into
//! containers, and the menu/placeholder/column texts.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::models::ContainerKind;

/// Kind of top-level catalog search
///
/// Variant order is the sorted order of kind names, used for menus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchKind {
    Albums,
    Artists,
    #[default]
    Tracks,
}

/// Where a payload keeps its track array
///
/// The catalog nests tracks differently depending on which request
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackShape {
    /// `{"tracks": {"items": [...]}}` from a track search
    SearchResults,
    /// `{"tracks": [...]}` from an artist's top tracks
    TopTracks,
    /// `{"items": [...]}` from an album's track listing
    AlbumTracks,
}

impl SearchKind {
    /// All kinds in sorted name order
    pub const ALL: [SearchKind; 3] = [SearchKind::Albums, SearchKind::Artists, SearchKind::Tracks];

    pub fn name(self) -> &'static str {
        match self {
            SearchKind::Tracks => "tracks",
            SearchKind::Artists => "artists",
            SearchKind::Albums => "albums",
        }
    }

    /// Search endpoint path and `type` parameter
    pub fn endpoint(self) -> &'static str {
        match self {
            SearchKind::Tracks => "/v1/search?type=track",
            SearchKind::Artists => "/v1/search?type=artist",
            SearchKind::Albums => "/v1/search?type=album",
        }
    }

    /// True when results populate the container panel instead of entries
    pub fn groups_into_containers(self) -> bool {
        !matches!(self, SearchKind::Tracks)
    }

    /// Container kind produced by this search, if it groups
    pub fn container_kind(self) -> Option<ContainerKind> {
        match self {
            SearchKind::Tracks => None,
            SearchKind::Artists => Some(ContainerKind::Artist),
            SearchKind::Albums => Some(ContainerKind::Album),
        }
    }

    pub fn track_shape(self) -> TrackShape {
        match self {
            SearchKind::Tracks => TrackShape::SearchResults,
            SearchKind::Artists => TrackShape::TopTracks,
            SearchKind::Albums => TrackShape::AlbumTracks,
        }
    }

    /// Search-type menu label
    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Tracks => "Search tracks",
            SearchKind::Artists => "Search artists",
            SearchKind::Albums => "Search albums",
        }
    }

    /// Search entry placeholder text
    pub fn placeholder(self) -> &'static str {
        match self {
            SearchKind::Tracks => "Search tracks on Spotify",
            SearchKind::Artists => "Search artists on Spotify",
            SearchKind::Albums => "Search albums on Spotify",
        }
    }

    /// Container panel column title; empty for tracks (panel hidden)
    pub fn title(self) -> &'static str {
        match self {
            SearchKind::Tracks => "",
            SearchKind::Artists => "Spotify Artists",
            SearchKind::Albums => "Spotify albums",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tracks" => Ok(SearchKind::Tracks),
            "artists" => Ok(SearchKind::Artists),
            "albums" => Ok(SearchKind::Albums),
            other => Err(Error::UnknownSearchKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("tracks".parse::<SearchKind>().unwrap(), SearchKind::Tracks);
        assert_eq!("artists".parse::<SearchKind>().unwrap(), SearchKind::Artists);
        assert_eq!("albums".parse::<SearchKind>().unwrap(), SearchKind::Albums);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "playlists".parse::<SearchKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownSearchKind(ref k) if k == "playlists"));
    }

    #[test]
    fn test_all_is_sorted_by_name() {
        let names: Vec<_> = SearchKind::ALL.iter().map(|k| k.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_only_tracks_is_flat() {
        assert!(!SearchKind::Tracks.groups_into_containers());
        assert!(SearchKind::Artists.groups_into_containers());
        assert!(SearchKind::Albums.groups_into_containers());
        assert_eq!(SearchKind::Tracks.title(), "");
    }

    #[test]
    fn test_menu_texts() {
        assert_eq!(SearchKind::Tracks.label(), "Search tracks");
        assert_eq!(SearchKind::Artists.label(), "Search artists");
        assert_eq!(SearchKind::Albums.label(), "Search albums");

        assert_eq!(SearchKind::Tracks.placeholder(), "Search tracks on Spotify");
        assert_eq!(SearchKind::Artists.placeholder(), "Search artists on Spotify");
        assert_eq!(SearchKind::Albums.placeholder(), "Search albums on Spotify");

        assert_eq!(SearchKind::Artists.title(), "Spotify Artists");
        assert_eq!(SearchKind::Albums.title(), "Spotify albums");
    }

    #[test]
    fn test_default_kind_is_tracks() {
        assert_eq!(SearchKind::default(), SearchKind::Tracks);
    }
}
