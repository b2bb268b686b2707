//! HTTP transport integration tests
//!
//! Runs ReqwestTransport and a full session against a local axum server
//! standing in for the catalog API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use catsync_common::events::EventBus;
use catsync_engine::services::{CatalogError, CatalogTransport, ReqwestTransport};
use catsync_engine::{
    CatalogClient, CatalogEndpoints, EntryStore, EventBusView, SearchKind, SearchSession,
};
use serde_json::{json, Value};

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let term = params.get("q").cloned().unwrap_or_default();
    Json(json!({
        "tracks": { "items": [{
            "uri": "spotify:track:1",
            "preview_url": "https://p.scdn.co/mp3-preview/1",
            "name": term,
            "artists": [{ "name": "A" }, { "name": "B" }],
            "album": { "images": [{}, {}, { "url": "https://i.scdn.co/image/small" }] },
        }]}
    }))
}

async fn whoami(headers: HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("none")
        .to_string()
}

async fn missing_album(Path(id): Path<String>) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("no album {}", id))
}

/// Start the fake catalog on an ephemeral port
async fn spawn_catalog() -> SocketAddr {
    let app = Router::new()
        .route("/v1/search", get(search))
        .route("/whoami", get(whoami))
        .route("/v1/albums/:id", get(missing_album));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn transport(token: Option<&str>) -> ReqwestTransport {
    ReqwestTransport::new(Duration::from_secs(5), token.map(str::to_string)).unwrap()
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let addr = spawn_catalog().await;

    let body = transport(None)
        .fetch(&format!("http://{}/v1/search?type=track&q=blue", addr))
        .await
        .unwrap();

    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["tracks"]["items"][0]["name"], "blue");
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let addr = spawn_catalog().await;

    let result = transport(None)
        .fetch(&format!("http://{}/v1/albums/nope", addr))
        .await;

    match result {
        Err(CatalogError::Api(status, message)) => {
            assert_eq!(status, 404);
            assert_eq!(message, "no album nope");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let addr = spawn_catalog().await;
    let url = format!("http://{}/whoami", addr);

    let with_token = transport(Some("secret")).fetch(&url).await.unwrap();
    assert_eq!(with_token, b"Bearer secret");

    let without_token = transport(None).fetch(&url).await.unwrap();
    assert_eq!(without_token, b"none");
}

#[tokio::test]
async fn test_unreachable_catalog_is_network_error() {
    // bind then drop to get a port nothing listens on
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let result = transport(None).fetch(&format!("http://{}/v1/search", addr)).await;
    assert!(matches!(result, Err(CatalogError::Network(_))));
}

#[tokio::test]
async fn test_session_over_http() {
    let addr = spawn_catalog().await;
    let client = CatalogClient::new(Arc::new(transport(Some("secret"))));
    let endpoints = CatalogEndpoints::new(format!("http://{}/", addr), "US");
    let store = EntryStore::in_memory().await.unwrap();
    let view = Arc::new(EventBusView::new(EventBus::new(64)));
    let session = SearchSession::new(client, endpoints, store, view).await.unwrap();

    let applied = session
        .start_search(SearchKind::Tracks, "kind of blue")
        .await
        .finished()
        .await
        .unwrap();
    assert_eq!(applied.entries, 1);

    let view = session.current_entries().await.unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].title, "kind of blue");
    assert_eq!(view[0].artist_display, "A, B");
    assert_eq!(view[0].cover_url.as_deref(), Some("https://i.scdn.co/image/small"));
    assert_eq!(view[0].playback_uri, "https://p.scdn.co/mp3-preview/1");
}
