//! Catalog HTTP client
//!
//! Issues cancellable GET requests against the remote catalog and hands the
//! raw body (or nothing) to a continuation.
//!
//! # Delivery
//! - Success: continuation receives `Some(bytes)`
//! - Transport failure or non-success status: continuation receives `None`
//! - Cancelled: continuation never runs
//!
//! There are no retries. A failed request is "no data" and the caller
//! decides what an empty result means.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catsync_common::config::TomlConfig;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("catsync/", env!("CARGO_PKG_VERSION"));

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),
}

/// Raw GET transport
///
/// Implemented over reqwest for the real catalog and by in-process fakes in
/// tests.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

/// reqwest-backed transport
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    access_token: Option<String>,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, access_token: Option<String>) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            access_token,
        })
    }

    pub fn from_config(config: &TomlConfig) -> Result<Self, CatalogError> {
        Self::new(
            Duration::from_secs(config.request_timeout_secs),
            config.resolved_access_token(),
        )
    }
}

#[async_trait]
impl CatalogTransport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let mut request = self.http_client.get(url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(body.to_vec())
    }
}

/// Handle to one in-flight catalog operation
///
/// Cancelling fires the token and aborts the task; whatever continuation the
/// operation carried is dropped without running.
#[derive(Debug)]
pub struct RequestHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl RequestHandle {
    /// Run `work` as a cancellable operation
    pub fn spawn<Fut>(work: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let guard = token.clone();
        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = guard.cancelled() => {
                    debug!("Catalog request cancelled");
                }
                _ = work => {}
            }
        });

        Self { token, task }
    }

    /// Abort the operation; its continuation will not run afterwards
    pub fn cancel(&self) {
        self.token.cancel();
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Catalog client
#[derive(Clone)]
pub struct CatalogClient {
    transport: Arc<dyn CatalogTransport>,
}

impl CatalogClient {
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    /// GET `url`, mapping every failure to `None`
    pub async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        debug!(url = %url, "Querying catalog");

        match self.transport.fetch(url).await {
            Ok(body) => {
                debug!(url = %url, bytes = body.len(), "Catalog response received");
                Some(body)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Catalog request failed, no data");
                None
            }
        }
    }

    /// Issue an asynchronous GET and deliver the result to `on_result`
    ///
    /// `on_result` runs at most once, and never after the returned handle
    /// is cancelled.
    pub fn get<F, Fut>(&self, url: String, on_result: F) -> RequestHandle
    where
        F: FnOnce(Option<Vec<u8>>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let client = self.clone();
        RequestHandle::spawn(async move {
            let body = client.fetch(&url).await;
            on_result(body).await;
        })
    }
}
