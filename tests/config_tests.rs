//! 配置加载集成测试

use commons::config::{CommonsConfig, LogPattern, init_config, get_config};
use commons::properties::{ConfigRegistry, Layer};
use tempfile::TempDir;

#[test]
fn test_generated_sample_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commons.toml");
    std::fs::write(&path, CommonsConfig::generate_sample_config()).unwrap();

    let loaded = CommonsConfig::load_from(&path).unwrap();
    assert_eq!(loaded.logging.pattern, LogPattern::Basic);
    assert_eq!(loaded.properties.base_name, "application");
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = CommonsConfig::load_from(dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded.logging.level, "info");
    assert!(loaded.properties.profiles.is_empty());
}

#[test]
fn test_invalid_value_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commons.toml");
    std::fs::write(&path, "[logging]\npattern = \"verbose\"\n").unwrap();

    let err = CommonsConfig::load_from(&path).unwrap_err();
    assert_eq!(err.code(), "C006");
}

#[test]
fn test_settings_build_registry() {
    let dir = TempDir::new().unwrap();
    let resources = dir.path().join("resources");
    std::fs::create_dir(&resources).unwrap();
    std::fs::write(resources.join("application.properties"), "greeting=hello\n").unwrap();
    std::fs::write(
        dir.path().join("commons.toml"),
        format!(
            "[properties]\ninternal_dir = {:?}\nexternal_dir = {:?}\n",
            resources.display().to_string(),
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let config = CommonsConfig::load_from(dir.path().join("commons.toml")).unwrap();
    let registry = ConfigRegistry::from_settings(&config.properties).unwrap();
    let report = registry.load(Layer::Internal);

    assert!(report.is_clean());
    assert_eq!(registry.get("greeting").as_deref(), Some("hello"));
}

#[test]
fn test_global_config_access() {
    let initialized = init_config();
    let fetched = get_config().unwrap();
    assert_eq!(*initialized, *fetched);
}
