//! Configuration loading and root folder resolution tests
//!
//! Uses serial_test to prevent environment variable races. Tests that touch
//! CATSYNC_ROOT_FOLDER or CATSYNC_ACCESS_TOKEN are marked #[serial].

use catsync_common::config::{
    default_root_folder, write_toml_config, LoggingConfig, RootFolderResolver, TomlConfig,
    ACCESS_TOKEN_ENV, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = TomlConfig::load(&dir.path().join("nope.toml")).unwrap();

    assert_eq!(config, TomlConfig::default());
    assert_eq!(config.market, "US");
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "market = [not toml").unwrap();

    let result = TomlConfig::load(&path);
    assert!(matches!(result, Err(catsync_common::Error::Config(_))));
}

#[test]
fn test_write_then_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = TomlConfig {
        api_base_url: "http://127.0.0.1:9999".to_string(),
        market: "SE".to_string(),
        access_token: Some("token".to_string()),
        request_timeout_secs: 5,
        database_path: Some(PathBuf::from("lib.db")),
        root_folder: None,
        logging: LoggingConfig {
            level: "debug".to_string(),
            file: None,
        },
    };

    write_toml_config(&config, &path).unwrap();
    assert!(!path.with_extension("toml.tmp").exists());

    let loaded = TomlConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root_folder = RootFolderResolver::new().resolve();
    assert_eq!(root_folder, default_root_folder());
}

#[test]
#[serial]
fn test_resolver_env_var_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/catsync-env-root");

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/catsync-toml-root")),
        ..Default::default()
    };
    let root_folder = RootFolderResolver::new().with_toml_config(&config).resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/catsync-env-root"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_cli_arg_beats_everything() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/catsync-env-root");

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/catsync-toml-root")),
        ..Default::default()
    };
    let root_folder = RootFolderResolver::new()
        .with_cli_arg(Some(PathBuf::from("/tmp/catsync-cli-root")))
        .with_toml_config(&config)
        .resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/catsync-cli-root"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_toml_used_without_env() {
    env::remove_var(ROOT_FOLDER_ENV);

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/catsync-toml-root")),
        ..Default::default()
    };
    let root_folder = RootFolderResolver::new().with_toml_config(&config).resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/catsync-toml-root"));
}

#[test]
#[serial]
fn test_access_token_env_overrides_toml() {
    let config = TomlConfig {
        access_token: Some("from-toml".to_string()),
        ..Default::default()
    };

    env::remove_var(ACCESS_TOKEN_ENV);
    assert_eq!(config.resolved_access_token().as_deref(), Some("from-toml"));

    env::set_var(ACCESS_TOKEN_ENV, "from-env");
    assert_eq!(config.resolved_access_token().as_deref(), Some("from-env"));

    env::remove_var(ACCESS_TOKEN_ENV);
}

#[test]
#[serial]
fn test_blank_access_token_is_ignored() {
    env::remove_var(ACCESS_TOKEN_ENV);

    let config = TomlConfig {
        access_token: Some("   ".to_string()),
        ..Default::default()
    };
    assert_eq!(config.resolved_access_token(), None);
}
