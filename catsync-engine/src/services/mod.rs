//! Engine services
//!
//! - catalog_client: cancellable catalog GETs
//! - result_mapper: payload decoding per request kind
//! - container_resolver: artist/album drill-down
//! - search_session: search orchestration and result sync
//! - catalog_links: "View on catalog" link building

pub mod catalog_client;
pub mod catalog_links;
pub mod container_resolver;
pub mod result_mapper;
pub mod search_session;

pub use catalog_client::{CatalogClient, CatalogError, CatalogTransport, RequestHandle, ReqwestTransport};
pub use catalog_links::{catalog_links, CatalogLink};
pub use container_resolver::{ContainerResolver, ResolvedTracks};
pub use search_session::{Applied, SearchSession, SearchTicket};
