//! Configuration loading tests

use std::fs;
use std::sync::Mutex;

use tempfile::TempDir;

use persona_tags::TagsConfig;

/// Serializes tests that read or write PERSONA_TAGS_* variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("persona-tags.toml");
    fs::write(&path, content).unwrap();
    (tmp, path)
}

#[test]
fn test_load_defaults_without_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    let config = TagsConfig::load(None).unwrap();
    assert_eq!(config.color.default_mode, "light");
    assert_eq!(config.watcher.poll_interval_ms, 1000);
}

#[test]
fn test_load_from_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    let (_tmp, path) = write_config(
        r#"
        [color]
        default_mode = "dark"
        max_attempts = 200

        [watcher]
        poll_interval_ms = 500

        [logging]
        level = "debug"
        "#,
    );

    let config = TagsConfig::load(Some(&path)).unwrap();
    assert_eq!(config.color.default_mode, "dark");
    assert_eq!(config.color.max_attempts, 200);
    assert_eq!(config.watcher.poll_interval_ms, 500);
    assert_eq!(config.logging.level, "debug");
    // Sections absent from the file keep defaults
    assert!(config.gc.purge_filter_selection);
}

#[test]
fn test_load_rejects_invalid_values() {
    let (_tmp, path) = write_config(
        r#"
        [color]
        default_mode = "neon"
        "#,
    );
    assert!(TagsConfig::load(Some(&path)).is_err());

    let (_tmp, path) = write_config(
        r#"
        [watcher]
        poll_interval_ms = 0
        "#,
    );
    assert!(TagsConfig::load(Some(&path)).is_err());
}

#[test]
fn test_load_rejects_malformed_toml() {
    let (_tmp, path) = write_config("[color\ndefault_mode = ");
    assert!(TagsConfig::load(Some(&path)).is_err());
}

#[test]
fn test_load_missing_explicit_file_errors() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("does-not-exist.toml");
    assert!(TagsConfig::load(Some(&path)).is_err());
}

#[test]
fn test_env_overrides_take_precedence() {
    let _guard = ENV_LOCK.lock().unwrap();
    let (_tmp, path) = write_config(
        r#"
        [logging]
        level = "warn"
        "#,
    );

    std::env::set_var("PERSONA_TAGS_LOG_LEVEL", "error");
    let result = TagsConfig::load(Some(&path));
    std::env::remove_var("PERSONA_TAGS_LOG_LEVEL");

    assert_eq!(result.unwrap().logging.level, "error");
}
