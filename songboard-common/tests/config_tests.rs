//! Tests for configuration and root folder resolution
//!
//! Uses serial_test: tests that touch SONGBOARD_ROOT_FOLDER / SONGBOARD_ROOT
//! run sequentially to avoid environment races.

use serial_test::serial;
use songboard_common::config::{
    CompiledDefaults, LoggingConfig, RootFolderInitializer, RootFolderResolver, TomlConfig,
    ROOT_ENV, ROOT_FOLDER_ENV,
};
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_cli_arg_has_highest_priority() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/songboard-env");

    let resolver = RootFolderResolver::new("test-module")
        .with_cli_arg(Some(PathBuf::from("/tmp/songboard-cli")));

    assert_eq!(resolver.resolve(), PathBuf::from("/tmp/songboard-cli"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_root_folder_env_takes_precedence_over_root() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/songboard-priority-1");
    env::set_var(ROOT_ENV, "/tmp/songboard-priority-2");

    let resolver = RootFolderResolver::new("test-module");
    assert_eq!(resolver.resolve(), PathBuf::from("/tmp/songboard-priority-1"));

    env::remove_var(ROOT_FOLDER_ENV);
    env::remove_var(ROOT_ENV);
}

#[test]
#[serial]
fn test_root_env_used_alone() {
    env::remove_var(ROOT_FOLDER_ENV);
    env::set_var(ROOT_ENV, "/tmp/songboard-root");

    let resolver = RootFolderResolver::new("test-module");
    assert_eq!(resolver.resolve(), PathBuf::from("/tmp/songboard-root"));

    env::remove_var(ROOT_ENV);
}

#[test]
#[serial]
fn test_missing_config_file_falls_back_to_default() {
    env::remove_var(ROOT_FOLDER_ENV);
    env::remove_var(ROOT_ENV);

    let resolver = RootFolderResolver::new("nonexistent-test-module-12345");
    let root_folder = resolver.resolve();

    assert_eq!(root_folder, CompiledDefaults::for_current_platform().root_folder);
}

#[test]
fn test_compiled_defaults() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(!defaults.root_folder.as_os_str().is_empty());
    assert!(defaults.root_folder.ends_with("songboard") || defaults.root_folder.ends_with("songboard_data"));
}

#[test]
fn test_initializer_creates_nested_directory_idempotently() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("level1").join("level2");
    let initializer = RootFolderInitializer::new(root.clone());

    assert!(initializer.ensure_directory_exists().is_ok());
    assert!(initializer.ensure_directory_exists().is_ok());
    assert!(root.is_dir());
}

#[test]
fn test_initializer_database_path() {
    let root = PathBuf::from("/tmp/songboard-test-root");
    let initializer = RootFolderInitializer::new(root.clone());

    assert_eq!(initializer.database_path(), root.join("songboard.db"));
    assert!(!initializer.database_exists());
}

#[test]
fn test_toml_config_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("songboard-api.toml");
    std::fs::write(
        &path,
        r#"
        root_folder = "/srv/songboard"
        port = 8080
        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let config = TomlConfig::load(&path).unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/songboard")));
    assert_eq!(config.port, Some(8080));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_toml_config_missing_fields_use_defaults() {
    let config: TomlConfig = toml::from_str("").unwrap();

    assert_eq!(config.root_folder, None);
    assert_eq!(config.port, None);
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_toml_config_malformed_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    let err = TomlConfig::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
