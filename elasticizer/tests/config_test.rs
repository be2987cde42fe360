//! Configuration as seen by a binary: load a file, apply overrides, validate.

use elasticizer::config::Config;
use elasticizer::{EngineConfig, Error};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_validate_defaults() {
    assert!(EngineConfig::default().validate().is_ok());
    assert!(Config::default().engine.validate().is_ok());
}

#[test]
fn test_validate_after_overrides() {
    let mut config = Config::default();
    config.engine.host = "http://es.internal:9200".to_string();
    config.engine.prefix = "tenant.".to_string();
    assert!(config.engine.validate().is_ok());

    config.engine.document_type = "  ".to_string();
    assert!(matches!(config.engine.validate(), Err(Error::Config(_))));

    let blank_host = EngineConfig::new("", "logs");
    assert!(matches!(blank_host.validate(), Err(Error::Config(_))));
}

#[test]
fn test_load_rejects_invalid_engine_section() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("elasticizer.toml");
    fs::write(
        &path,
        r#"
[engine]
host = "http://localhost:9200"
document_type = ""
"#,
    )
    .unwrap();

    assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    assert!(matches!(Config::load_or_default(&path), Err(Error::Config(_))));
}
