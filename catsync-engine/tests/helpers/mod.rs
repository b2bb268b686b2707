//! Shared test helpers: in-process catalog fake and session builders

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catsync_common::events::EventBus;
use catsync_engine::services::{CatalogError, CatalogTransport};
use catsync_engine::{CatalogClient, CatalogEndpoints, EntryStore, EventBusView, SearchSession};
use tokio::sync::Notify;

pub const BASE: &str = "https://api.spotify.com";

enum Route {
    Body(Vec<u8>),
    Status(u16),
    /// Answers only after the gate is released
    Gated(Arc<Notify>, Vec<u8>),
}

/// Catalog fake keyed by full request URL
///
/// Unknown URLs answer 404. Every requested URL is recorded in order.
#[derive(Default)]
pub struct FakeCatalog {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Route::Body(body.into()));
    }

    pub fn fail(&self, url: &str, status: u16) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Route::Status(status));
    }

    /// Register a response held back until the returned gate is notified
    pub fn respond_gated(&self, url: &str, body: impl Into<Vec<u8>>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Route::Gated(gate.clone(), body.into()));
        gate
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogTransport for FakeCatalog {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.requests.lock().unwrap().push(url.to_string());

        let reply = {
            let routes = self.routes.lock().unwrap();
            match routes.get(url) {
                Some(Route::Body(body)) => Route::Body(body.clone()),
                Some(Route::Status(status)) => Route::Status(*status),
                Some(Route::Gated(gate, body)) => Route::Gated(gate.clone(), body.clone()),
                None => Route::Status(404),
            }
        };

        match reply {
            Route::Body(body) => Ok(body),
            Route::Status(status) => Err(CatalogError::Api(status, "fake".to_string())),
            Route::Gated(gate, body) => {
                gate.notified().await;
                Ok(body)
            }
        }
    }
}

pub struct Harness {
    pub session: SearchSession,
    pub catalog: Arc<FakeCatalog>,
    pub event_bus: EventBus,
}

pub async fn harness() -> Harness {
    harness_with_store(EntryStore::in_memory().await.unwrap()).await
}

pub async fn harness_with_store(store: EntryStore) -> Harness {
    let catalog = FakeCatalog::new();
    let event_bus = EventBus::new(256);
    let view = Arc::new(EventBusView::new(event_bus.clone()));
    let session = SearchSession::new(
        CatalogClient::new(catalog.clone()),
        CatalogEndpoints::new(BASE, "US"),
        store,
        view,
    )
    .await
    .unwrap();

    Harness {
        session,
        catalog,
        event_bus,
    }
}

/// Track search payload (`tracks.items`)
pub fn track_search(items: &[serde_json::Value]) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "tracks": { "items": items } })).unwrap()
}

/// Track item with its own album art at index 2
pub fn track(uri: &str, name: &str, cover: &str) -> serde_json::Value {
    serde_json::json!({
        "uri": uri,
        "preview_url": format!("preview-{}", uri),
        "name": name,
        "artists": [{ "name": "A" }],
        "album": { "images": [{}, {}, { "url": cover }] },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", uri) },
    })
}

/// Album listing track, no album art
pub fn bare_track(uri: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "uri": uri,
        "preview_url": format!("preview-{}", uri),
        "name": name,
        "artists": [{ "name": "A" }, { "name": "B" }],
    })
}

pub fn container_item(kind: &str, id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "type": kind,
        "id": id,
        "external_urls": { "spotify": format!("https://open.spotify.com/{}/{}", kind, id) },
    })
}
