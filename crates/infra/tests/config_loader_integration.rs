//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! turning it into a client.

use std::io::Write;

use nordigen_domain::NordigenError;
use nordigen_infra::config;
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "secret_id": "9a7ae8ea-13d5-4f7e-b5b8-b1e6e6ff8bb5",
        "secret_key": "ff2a240c",
        "base_url": "https://ob.example.test/api/v2",
        "timeout_secs": 10,
        "token_expiration_buffer_secs": -30,
        "page_size": 250
    }"#;
    let path = write_config(json_content, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file");

    let config = result.unwrap();
    assert_eq!(config.secret_id, "9a7ae8ea-13d5-4f7e-b5b8-b1e6e6ff8bb5");
    assert_eq!(config.secret_key, "ff2a240c");
    assert_eq!(config.base_url, "https://ob.example.test/api/v2");
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.token_expiration_buffer_secs, -30);
    assert_eq!(config.page_size, 250);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_with_minimal_fields_and_connect() {
    let toml_content = r#"
secret_id = "9a7ae8ea-13d5-4f7e-b5b8-b1e6e6ff8bb5"
secret_key = "eafc3b"
"#;
    let path = write_config(toml_content, "toml");

    let config = config::load_from_file(Some(path.clone())).expect("minimal config");
    let client = nordigen_infra::connect(&config).expect("client");

    assert_eq!(client.rest().base_url(), "https://ob.nordigen.com/api/v2");
    assert_eq!(client.page_size(), 1000);
    assert_eq!(client.token_manager().credentials().secret_key().as_bytes(), &[234, 252, 59]);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_connect_rejects_malformed_credentials() {
    let path = write_config(
        r#"{"secret_id": "9a7ae8ea-13d5-4f7e-b5b8-b1e6e6ff8bb5", "secret_key": "eaf-c3b"}"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config parses");
    let result = nordigen_infra::connect(&config);
    assert!(matches!(result, Err(NordigenError::Config(_))));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/nordigen.json".into()));

    match result {
        Err(NordigenError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "secret_id": "not closed" "#, "json");

    let result = config::load_from_file(Some(path.clone()));
    match result {
        Err(NordigenError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        _ => panic!("Expected Config error"),
    }

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_rejects_positive_buffer() {
    let path = write_config(
        r#"{"secret_id": "9a7ae8ea-13d5-4f7e-b5b8-b1e6e6ff8bb5", "secret_key": "eafc3b", "token_expiration_buffer_secs": 5}"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(NordigenError::Config(_))));

    std::fs::remove_file(path).ok();
}
