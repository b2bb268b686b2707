//! Catalog endpoint configuration
//!
//! Builds every outbound URL from the configured API host:
//! - search: `<base><kind endpoint>&q=<escaped term>`
//! - artist top tracks: `<base>/v1/artists/<id>/top-tracks?country=<market>`
//! - album metadata: `<base>/v1/albums/<id>`
//! - album tracks: `<base>/v1/albums/<id>/tracks`

use catsync_common::config::TomlConfig;

use crate::models::SearchKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    base_url: String,
    market: String,
}

impl CatalogEndpoints {
    pub fn new(base_url: impl Into<String>, market: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            market: market.into(),
        }
    }

    pub fn from_config(config: &TomlConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.market.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search_url(&self, kind: SearchKind, term: &str) -> String {
        format!(
            "{}{}&q={}",
            self.base_url,
            kind.endpoint(),
            urlencoding::encode(term)
        )
    }

    pub fn artist_top_tracks_url(&self, id: &str) -> String {
        format!(
            "{}/v1/artists/{}/top-tracks?country={}",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(&self.market)
        )
    }

    pub fn album_url(&self, id: &str) -> String {
        format!("{}/v1/albums/{}", self.base_url, urlencoding::encode(id))
    }

    pub fn album_tracks_url(&self, id: &str) -> String {
        format!("{}/v1/albums/{}/tracks", self.base_url, urlencoding::encode(id))
    }
}

impl Default for CatalogEndpoints {
    fn default() -> Self {
        Self::from_config(&TomlConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        let endpoints = CatalogEndpoints::new("https://api.spotify.com", "US");
        assert_eq!(
            endpoints.search_url(SearchKind::Tracks, "blue"),
            "https://api.spotify.com/v1/search?type=track&q=blue"
        );
    }

    #[test]
    fn test_search_term_is_escaped() {
        let endpoints = CatalogEndpoints::new("https://api.spotify.com/", "US");
        assert_eq!(
            endpoints.search_url(SearchKind::Albums, "kind of blue & more"),
            "https://api.spotify.com/v1/search?type=album&q=kind%20of%20blue%20%26%20more"
        );
    }

    #[test]
    fn test_follow_up_urls() {
        let endpoints = CatalogEndpoints::default();
        assert_eq!(
            endpoints.artist_top_tracks_url("art1"),
            "https://api.spotify.com/v1/artists/art1/top-tracks?country=US"
        );
        assert_eq!(endpoints.album_url("alb1"), "https://api.spotify.com/v1/albums/alb1");
        assert_eq!(
            endpoints.album_tracks_url("alb1"),
            "https://api.spotify.com/v1/albums/alb1/tracks"
        );
    }
}
