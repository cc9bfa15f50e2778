//! Integration tests for gzcore-config persistence.

use gzcore_config::{BINDINGS_SECTION, Config, ConfigError, LogLevel};
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.render.screen_blocks, 10);
    assert!(config.render.scale_viewport);
    assert!(!config.render.fullscreen);
    assert_eq!(config.input.double_click_ms, 571);
    assert_eq!(config.log_level, LogLevel::Off);
    assert!(config.sections.is_empty());
}

#[test]
fn test_load_missing_file_creates_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
    assert!(path.exists());
}

#[test]
fn test_save_and_reload_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    let mut config = Config::new().with_screen_blocks(8);
    {
        let section = config.section_mut(BINDINGS_SECTION);
        section.set_value("w", "+forward");
        section.set_value("LeftBracket", "invprev");
    }
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.render.screen_blocks, 8);
    let section = loaded.section(BINDINGS_SECTION).unwrap();
    assert_eq!(section.get("W"), Some("+forward"));
    assert_eq!(section.get("leftbracket"), Some("invprev"));
    assert!(!dir.path().join("config.yaml.tmp").exists());
}

#[test]
fn test_partial_yaml_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "render:\n  scale_viewport: false\nlog_level: debug\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.render.scale_viewport);
    assert_eq!(config.render.screen_blocks, 10);
    assert_eq!(config.input.double_click_ms, 571);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "render: [not, a, map").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_out_of_range_setting_is_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "render:\n  screen_blocks: 40\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Validation {
            field: "render.screen_blocks",
            value: 40,
            ..
        })
    ));
}
