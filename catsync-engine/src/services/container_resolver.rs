//! Container drill-down
//!
//! Fetches the member tracks of a selected artist or album.
//!
//! Albums take two requests: the album metadata (for its cover), then the
//! track listing. Album tracks carry no art of their own, so the cover from
//! the first request is applied to every track. A failed cover lookup
//! leaves the cover absent and the track listing still loads.

use tracing::{debug, info};

use crate::config::CatalogEndpoints;
use crate::models::{Container, ContainerKind};
use crate::services::catalog_client::CatalogClient;
use crate::services::result_mapper::{self, TrackItem};

/// Member tracks of a container, ready to upsert
#[derive(Debug, Clone, Default)]
pub struct ResolvedTracks {
    pub tracks: Vec<TrackItem>,
    /// Cover to apply to every track instead of per-track art
    pub cover_override: Option<String>,
}

#[derive(Clone)]
pub struct ContainerResolver {
    client: CatalogClient,
    endpoints: CatalogEndpoints,
}

impl ContainerResolver {
    pub fn new(client: CatalogClient, endpoints: CatalogEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub async fn resolve(&self, container: &Container) -> ResolvedTracks {
        info!(kind = %container.kind, id = %container.id, "Loading container");

        match container.kind {
            ContainerKind::Artist => self.resolve_artist(&container.id).await,
            ContainerKind::Album => self.resolve_album(&container.id).await,
        }
    }

    /// Top tracks for an artist
    pub async fn resolve_artist(&self, id: &str) -> ResolvedTracks {
        let url = self.endpoints.artist_top_tracks_url(id);
        let tracks = match self.client.fetch(&url).await {
            Some(body) => result_mapper::map_tracks(&body, ContainerKind::Artist.drill_kind()),
            None => Vec::new(),
        };

        ResolvedTracks {
            tracks,
            cover_override: None,
        }
    }

    /// Album cover first, then the album's track listing
    pub async fn resolve_album(&self, id: &str) -> ResolvedTracks {
        let cover_override = self.album_cover(id).await;
        if cover_override.is_none() {
            debug!(id = %id, "Album cover unavailable, loading tracks without it");
        }

        let url = self.endpoints.album_tracks_url(id);
        let tracks = match self.client.fetch(&url).await {
            Some(body) => result_mapper::map_tracks(&body, ContainerKind::Album.drill_kind()),
            None => Vec::new(),
        };

        ResolvedTracks {
            tracks,
            cover_override,
        }
    }

    pub async fn album_cover(&self, id: &str) -> Option<String> {
        let url = self.endpoints.album_url(id);
        let body = self.client.fetch(&url).await?;
        result_mapper::map_album_cover(&body)
    }
}
