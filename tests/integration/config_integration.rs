//! Integration tests for layered configuration loading

use std::fs;

use curricula::config::{ConfigLoader, CurriculaConfig};
use tempfile::TempDir;

use crate::integration::test_utils::ENV_MUTEX;

fn write_workspace_config(root: &std::path::Path, name: &str, body: &str) {
    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join(name), body).unwrap();
}

#[test]
fn test_defaults_without_any_files() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let workspace = TempDir::new().unwrap();

    let config = ConfigLoader::load(workspace.path()).unwrap();

    let defaults = CurriculaConfig::default();
    assert_eq!(config.retry, defaults.retry);
    assert_eq!(config.bulk, defaults.bulk);
    assert_eq!(config.generation.request_timeout_secs, 120);
    assert!(config.validate().is_ok());
}

#[test]
fn test_environment_file_overrides_base_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let workspace = TempDir::new().unwrap();
    write_workspace_config(
        workspace.path(),
        "config.toml",
        r#"
[retry]
max_attempts = 5

[bulk]
item_interval_ms = 10
"#,
    );
    write_workspace_config(
        workspace.path(),
        "staging.toml",
        r#"
[bulk]
item_interval_ms = 20
"#,
    );

    std::env::set_var("CURRICULA_ENV", "staging");
    let loaded = ConfigLoader::load(workspace.path());
    std::env::remove_var("CURRICULA_ENV");
    let config = loaded.unwrap();

    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.initial_delay_ms, 1000);
    assert_eq!(config.bulk.item_interval_ms, 20);
}

#[test]
fn test_environment_variables_win() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let workspace = TempDir::new().unwrap();
    write_workspace_config(
        workspace.path(),
        "config.toml",
        r#"
[retry]
max_attempts = 5
"#,
    );

    std::env::set_var("CURRICULA__RETRY__MAX_ATTEMPTS", "7");
    std::env::set_var("CURRICULA__GENERATION__ENDPOINT", "http://localhost:7070/generate");
    let loaded = ConfigLoader::load(workspace.path());
    std::env::remove_var("CURRICULA__RETRY__MAX_ATTEMPTS");
    std::env::remove_var("CURRICULA__GENERATION__ENDPOINT");
    let config = loaded.unwrap();

    assert_eq!(config.retry.max_attempts, 7);
    assert_eq!(
        config.generation.configured_endpoint(),
        Some("http://localhost:7070/generate")
    );
    assert!(config.content_client().unwrap().is_configured());
}

#[test]
fn test_invalid_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[retry]\nmax_attempts = \"many\"\n").unwrap();

    assert!(ConfigLoader::load_from_file(&path).is_err());
}
