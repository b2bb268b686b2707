//! "View on catalog" links
//!
//! Builds the link menu for the playing entry, the selected entry and the
//! selected container. Links are keyed by URL: a later source with the same
//! URL replaces the earlier label but keeps its position.

use crate::models::{Container, Entry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLink {
    pub label: String,
    pub url: String,
}

/// Links for whatever is playing/selected; empty means nothing to link
pub fn catalog_links(
    playing: Option<&Entry>,
    selected: Option<&Entry>,
    container: Option<&Container>,
) -> Vec<CatalogLink> {
    let mut links: Vec<CatalogLink> = Vec::new();

    let mut add = |url: &str, label: String| {
        if url.is_empty() {
            return;
        }
        match links.iter_mut().find(|link| link.url == url) {
            Some(link) => link.label = label,
            None => links.push(CatalogLink {
                label,
                url: url.to_string(),
            }),
        }
    };

    for entry in [playing, selected].into_iter().flatten() {
        add(&entry.uri, format!("View '{}' on Spotify", entry.title));
    }

    if let Some(container) = container {
        add(&container.external_url, format!("View '{}' on Spotify", container.name));
    }

    links
}
