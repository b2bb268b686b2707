//! catsync-engine library interface
//!
//! Search-and-sync engine: issues catalog queries, maps results into local
//! track entries, keeps repeated searches from duplicating rows, and drills
//! from artists/albums into their tracks.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod view;

pub use crate::config::CatalogEndpoints;
pub use crate::db::EntryStore;
pub use crate::error::{Error, Result};
pub use crate::models::{Container, ContainerKind, Entry, Generation, SearchKind};
pub use crate::services::{CatalogClient, SearchSession, SearchTicket};
pub use crate::view::{EventBusView, ViewRenderer};
