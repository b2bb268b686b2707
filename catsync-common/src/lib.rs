//! # catsync common library
//!
//! Shared code for the catsync crates:
//! - Error type used across crates
//! - TOML bootstrap configuration and root folder resolution
//! - View events and the EventBus that carries them to the UI side

pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
