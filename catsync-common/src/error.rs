//! Errors shared by the catsync crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Config file or root folder could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file exists but is not valid TOML for [`crate::config::TomlConfig`]
    #[error("Configuration error: {0}")]
    Config(String),
}
