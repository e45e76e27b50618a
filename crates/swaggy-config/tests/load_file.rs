//! Loading configuration files from disk.

use std::io::Write;
use std::path::PathBuf;

use swaggy_config::{ConfigError, ConfigLoader, LogFormat, MethodMismatchPolicy};
use tempfile::Builder;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_complete_toml_file() {
    let file = write_temp(
        ".toml",
        r#"
        [router]
        spec_path = "api/openapi.yaml"
        method_mismatch = "method_not_allowed"
        placeholder_body = "stub"

        [telemetry]
        service_name = "customers-api"
        environment = "staging"

        [telemetry.logging]
        enabled = true
        level = "swaggy_router=trace,info"
        format = "pretty"
        ansi_enabled = true
        include_location = true

        [telemetry.metrics]
        enabled = true
        "#,
    );

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();

    assert_eq!(config.router.spec_path, Some(PathBuf::from("api/openapi.yaml")));
    assert_eq!(config.router.method_mismatch, MethodMismatchPolicy::MethodNotAllowed);
    assert_eq!(config.router.placeholder_body, "stub");
    assert_eq!(config.telemetry.service_name, "customers-api");
    assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
    assert!(config.telemetry.metrics.enabled);
}

#[test]
fn test_json_file() {
    let file = write_temp(".json", r#"{"router": {"spec_path": "openapi.json"}}"#);
    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert_eq!(config.router.spec_path, Some(PathBuf::from("openapi.json")));
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp(".ini", "[router]");
    let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
fn test_invalid_value_fails_validation() {
    let file = write_temp(".toml", "[telemetry]\nservice_name = \"\"");
    let err = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}
