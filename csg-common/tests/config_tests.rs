//! Configuration loading and root folder resolution tests
//!
//! Tests that touch CSG_ROOT_FOLDER are marked #[serial] so they do not
//! race each other on the process environment.

use csg_common::config::{
    default_root_folder, load_toml_config, write_toml_config, LoggingConfig, RootFolderResolver,
    TomlConfig, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_toml_config(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = [not toml").unwrap();
    assert!(load_toml_config(&path).is_err());
}

#[test]
fn test_write_then_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/samples/voice")),
        preset_dir: Some(PathBuf::from("/samples/presets")),
        default_symbols: Some(vec!["A".into(), "E".into(), "AY".into()]),
        logging: LoggingConfig {
            level: "debug".into(),
            file: None,
        },
    };

    write_toml_config(&config, &path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(load_toml_config(&path).unwrap(), config);
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);
    let resolved = RootFolderResolver::new().resolve();
    assert_eq!(resolved, default_root_folder());
}

#[test]
#[serial]
fn test_env_var_wins_over_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/from/env");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };
    let resolved = RootFolderResolver::new().with_config(&config).resolve();
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(resolved, PathBuf::from("/from/env"));
}

#[test]
#[serial]
fn test_cli_wins_over_env_var() {
    env::set_var(ROOT_FOLDER_ENV, "/from/env");
    let resolved = RootFolderResolver::new()
        .with_cli_arg(Some(PathBuf::from("/from/cli")))
        .resolve();
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(resolved, PathBuf::from("/from/cli"));
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    env::set_var(ROOT_FOLDER_ENV, "  ");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };
    let resolved = RootFolderResolver::new().with_config(&config).resolve();
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(resolved, PathBuf::from("/from/toml"));
}
