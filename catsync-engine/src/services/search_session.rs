//! Search session
//!
//! Orchestrates searches and container drill-downs against the catalog and
//! syncs their results into the entry store.
//!
//! # State
//! - `generation`: bumped once per search or drill-down, never decremented
//! - `current_request`: at most one live catalog operation
//! - `containers`: rebuilt from scratch by every search; drill-downs keep
//!   the list so sibling containers stay selectable
//!
//! # Ordering
//! Every new search or drill-down cancels the live request before issuing
//! its own. Results are applied under the state lock, and only when their
//! generation is still current and their request is still the live one, so
//! a superseded request can never touch the store or the view.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex, MutexGuard};
use tracing::{debug, info, trace, warn};

use crate::config::CatalogEndpoints;
use crate::db::EntryStore;
use crate::error::Result;
use crate::models::{Container, Entry, Generation, SearchKind};
use crate::services::catalog_client::{CatalogClient, RequestHandle};
use crate::services::container_resolver::{ContainerResolver, ResolvedTracks};
use crate::services::result_mapper::{self, TrackItem};
use crate::view::ViewRenderer;

/// Counts of what one request added to the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
    pub entries: usize,
    pub containers: usize,
}

/// Receipt for an issued search or drill-down
///
/// Dropping the ticket does not cancel anything.
#[derive(Debug)]
pub struct SearchTicket {
    generation: Generation,
    done: oneshot::Receiver<Applied>,
}

impl SearchTicket {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Wait for the results to land
    ///
    /// `None` when the request was cancelled or superseded before its
    /// results could be applied.
    pub async fn finished(self) -> Option<Applied> {
        self.done.await.ok()
    }
}

struct SessionState {
    generation: Generation,
    current_request: Option<RequestHandle>,
    containers: Vec<Container>,
    search_kind: SearchKind,
    search_text: Option<String>,
}

impl SessionState {
    /// True while results for `generation` may still be applied
    fn accepts(&self, generation: Generation) -> bool {
        generation == self.generation
            && self
                .current_request
                .as_ref()
                .is_some_and(|request| !request.is_cancelled())
    }

    fn cancel_request(&mut self) {
        if let Some(request) = self.current_request.take() {
            debug!(generation = %self.generation, "Cancelling in-flight catalog request");
            request.cancel();
        }
    }
}

struct Shared {
    state: Mutex<SessionState>,
    client: CatalogClient,
    resolver: ContainerResolver,
    endpoints: CatalogEndpoints,
    store: EntryStore,
    view: Arc<dyn ViewRenderer>,
}

/// One logical search-and-browse flow over the catalog
#[derive(Clone)]
pub struct SearchSession {
    shared: Arc<Shared>,
}

impl SearchSession {
    /// Create a session over `store`
    ///
    /// The generation counter resumes above the highest generation already
    /// stored, so entries from an earlier run never show in a new view.
    pub async fn new(
        client: CatalogClient,
        endpoints: CatalogEndpoints,
        store: EntryStore,
        view: Arc<dyn ViewRenderer>,
    ) -> Result<Self> {
        let generation = store.latest_generation().await?;
        let resolver = ContainerResolver::new(client.clone(), endpoints.clone());

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SessionState {
                    generation,
                    current_request: None,
                    containers: Vec::new(),
                    search_kind: SearchKind::default(),
                    search_text: None,
                }),
                client,
                resolver,
                endpoints,
                store,
                view,
            }),
        })
    }

    /// Search entry point taking the kind by name
    ///
    /// The view is reset before the kind is validated; an unknown kind
    /// leaves an empty view and issues no request.
    pub async fn search_requested(&self, kind: &str, term: &str) -> Result<SearchTicket> {
        let mut state = self.shared.state.lock().await;
        let generation = self.shared.open_search_view(&mut state);

        let kind = match kind.parse::<SearchKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!(kind = %kind, "Not sure how to search for this kind, no request issued");
                return Err(e);
            }
        };

        state.search_kind = kind;
        state.search_text = Some(term.to_string());
        Ok(self.shared.issue_search(&mut state, kind, term, generation))
    }

    /// Start a search of `kind` for `term`
    pub async fn start_search(&self, kind: SearchKind, term: &str) -> SearchTicket {
        let mut state = self.shared.state.lock().await;
        let generation = self.shared.open_search_view(&mut state);

        state.search_kind = kind;
        state.search_text = Some(term.to_string());
        self.shared.issue_search(&mut state, kind, term, generation)
    }

    /// Switch the active search kind
    ///
    /// Re-runs the last search with the new kind when a term is active.
    pub async fn set_search_kind(&self, kind: SearchKind) -> Option<SearchTicket> {
        let mut state = self.shared.state.lock().await;
        info!(kind = %kind, "Search kind selected");
        state.search_kind = kind;

        let term = state.search_text.clone()?;
        let generation = self.shared.open_search_view(&mut state);
        Some(self.shared.issue_search(&mut state, kind, &term, generation))
    }

    /// Drill into a container's member tracks
    pub async fn select_container(&self, container: &Container) -> SearchTicket {
        let mut state = self.shared.state.lock().await;
        let generation = self.shared.open_view(&mut state);
        self.shared.issue_drill(&mut state, container, generation)
    }

    /// Container selection changed; `None` when the selection was cleared
    ///
    /// Either way a fresh empty view is opened and the live request dropped.
    /// The container list itself is left alone.
    pub async fn container_selected(&self, container: Option<&Container>) -> Option<SearchTicket> {
        match container {
            Some(container) => Some(self.select_container(container).await),
            None => {
                let mut state = self.shared.state.lock().await;
                self.shared.open_view(&mut state);
                None
            }
        }
    }

    /// The player moved on to `entry`
    ///
    /// An entry with a cover is published to the view's art store, keyed by
    /// its title and artist.
    pub fn playing_entry_changed(&self, entry: Option<&Entry>) {
        let Some(entry) = entry else {
            return;
        };
        if let Some(cover_url) = entry.cover_url.as_deref() {
            debug!(uri = %entry.uri, cover = %cover_url, "Publishing cover for playing entry");
            self.shared
                .view
                .cover_art(&entry.title, &entry.artist_display, cover_url);
        }
    }

    /// Cancel the live request without opening a new view
    pub async fn cancel(&self) {
        self.shared.state.lock().await.cancel_request();
    }

    pub async fn current_generation(&self) -> Generation {
        self.shared.state.lock().await.generation
    }

    pub async fn search_kind(&self) -> SearchKind {
        self.shared.state.lock().await.search_kind
    }

    pub async fn containers(&self) -> Vec<Container> {
        self.shared.state.lock().await.containers.clone()
    }

    /// Entries of the active view
    pub async fn current_entries(&self) -> Result<Vec<Entry>> {
        let generation = self.current_generation().await;
        self.shared.store.entries_at(generation).await
    }

    pub fn store(&self) -> &EntryStore {
        &self.shared.store
    }
}

impl Shared {
    /// Cancel the live request, bump the generation and reset the view
    fn open_view(&self, state: &mut MutexGuard<'_, SessionState>) -> Generation {
        state.cancel_request();

        state.generation = state.generation.next();
        self.view.reset_entries(state.generation);
        state.generation
    }

    /// [`Self::open_view`] for a top-level search, which also starts a new
    /// container list
    fn open_search_view(&self, state: &mut MutexGuard<'_, SessionState>) -> Generation {
        let generation = self.open_view(state);
        state.containers.clear();
        generation
    }

    fn issue_search(
        self: &Arc<Self>,
        state: &mut MutexGuard<'_, SessionState>,
        kind: SearchKind,
        term: &str,
        generation: Generation,
    ) -> SearchTicket {
        info!(kind = %kind, term = %term, generation = %generation, "Searching catalog");

        self.view.set_container_title(kind.title());
        self.view.set_container_panel_visible(kind.groups_into_containers());

        let url = self.endpoints.search_url(kind, term);
        let (tx, rx) = oneshot::channel();
        let session = Arc::clone(self);
        let request = self.client.get(url, move |body| async move {
            session.deliver_search(generation, kind, body, tx).await;
        });

        state.current_request = Some(request);
        SearchTicket { generation, done: rx }
    }

    fn issue_drill(
        self: &Arc<Self>,
        state: &mut MutexGuard<'_, SessionState>,
        container: &Container,
        generation: Generation,
    ) -> SearchTicket {
        let (tx, rx) = oneshot::channel();
        let session = Arc::clone(self);
        let container = container.clone();
        let request = RequestHandle::spawn(async move {
            let resolved = session.resolver.resolve(&container).await;
            session.deliver_tracks(generation, resolved, tx).await;
        });

        state.current_request = Some(request);
        SearchTicket { generation, done: rx }
    }

    async fn deliver_search(
        &self,
        generation: Generation,
        kind: SearchKind,
        body: Option<Vec<u8>>,
        done: oneshot::Sender<Applied>,
    ) {
        let mut state = self.state.lock().await;
        if !state.accepts(generation) {
            debug!(generation = %generation, current = %state.generation, "Discarding stale search results");
            return;
        }

        let applied = match (body, kind.container_kind()) {
            (None, _) => Applied::default(),
            (Some(body), Some(container_kind)) => {
                let containers = result_mapper::map_containers(&body, container_kind);
                for container in &containers {
                    self.view.container_added(container);
                }
                state.containers.extend(containers);
                Applied {
                    entries: 0,
                    containers: state.containers.len(),
                }
            }
            (Some(body), None) => {
                let tracks = result_mapper::map_tracks(&body, kind);
                Applied {
                    entries: self.upsert_tracks(generation, &tracks, None).await,
                    containers: 0,
                }
            }
        };

        self.finish(&mut state, generation, applied, done);
    }

    async fn deliver_tracks(
        &self,
        generation: Generation,
        resolved: ResolvedTracks,
        done: oneshot::Sender<Applied>,
    ) {
        let mut state = self.state.lock().await;
        if !state.accepts(generation) {
            debug!(generation = %generation, current = %state.generation, "Discarding stale container tracks");
            return;
        }

        let entries = self
            .upsert_tracks(generation, &resolved.tracks, resolved.cover_override.as_deref())
            .await;

        self.finish(&mut state, generation, Applied { entries, containers: 0 }, done);
    }

    /// Upsert each track once; a failing item is logged and skipped
    async fn upsert_tracks(
        &self,
        generation: Generation,
        tracks: &[TrackItem],
        cover_override: Option<&str>,
    ) -> usize {
        let mut seen = HashSet::new();
        let mut applied = 0;
        for track in tracks {
            if !seen.insert(track.uri.as_str()) {
                trace!(uri = %track.uri, "Duplicate uri in batch, skipping");
                continue;
            }
            match self.store.upsert(track, generation, cover_override).await {
                Ok(entry) => {
                    self.view.entry_visible(&entry);
                    applied += 1;
                }
                Err(e) => {
                    warn!(uri = %track.uri, error = %e, "Failed to store entry, skipping");
                }
            }
        }
        applied
    }

    fn finish(
        &self,
        state: &mut MutexGuard<'_, SessionState>,
        generation: Generation,
        applied: Applied,
        done: oneshot::Sender<Applied>,
    ) {
        // request ran to completion; nothing left to cancel
        state.current_request = None;

        info!(
            generation = %generation,
            entries = applied.entries,
            containers = applied.containers,
            "Catalog results applied"
        );
        self.view.results_applied(generation, applied.entries, applied.containers);
        let _ = done.send(applied);
    }
}
