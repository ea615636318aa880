//! Integration tests for jwrap-config schema types and the loader.

use std::io::Write;

use jwrap_config::load_config;
use jwrap_config::schema::{AccessConfig, DispatchConfig, JwrapConfig, ServerConfig};
use tempfile::NamedTempFile;

#[test]
fn default_values() {
    let config = JwrapConfig::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.path, "/json");
    assert!(config.dispatch.required_keys.is_empty());
    assert_eq!(config.dispatch.discovery_aliases, ["map", "methods", "wsdl"]);
    assert!(config.dispatch.sanitize_values);
    assert!(config.access.remote_api_allowed);
    assert!(!config.access.demo_mode);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn serde_roundtrip() {
    let config = JwrapConfig::default();
    let json = serde_json::to_string(&config).expect("serialize");
    let back: JwrapConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.server.port, config.server.port);
    assert_eq!(
        back.dispatch.discovery_aliases,
        config.dispatch.discovery_aliases
    );
}

#[test]
fn deny_unknown_fields_rejects_extra_key() {
    let json = r#"{"server":{},"dispatch":{},"access":{},"logging":{},"unknown_key":"bad"}"#;
    let result: Result<JwrapConfig, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn partial_config_uses_defaults_for_missing() {
    let json = r#"{"server":{"port":9000},"access":{"demo_mode":true}}"#;
    let config: JwrapConfig = serde_json::from_str(json).expect("parse");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.path, "/json");
    assert!(config.access.demo_mode);
    assert!(config.access.remote_api_allowed);
}

#[test]
fn section_defaults_match_struct_defaults() {
    assert_eq!(ServerConfig::default().port, 8080);
    assert!(DispatchConfig::default().sanitize_values);
    assert!(AccessConfig::default().remote_api_allowed);
}

#[test]
fn load_without_file_returns_defaults() {
    let config = load_config(None).expect("load");
    assert_eq!(config.server.path, "/json");
}

#[test]
fn load_merges_toml_file() {
    let mut file = NamedTempFile::new().expect("tempfile");
    write!(
        file,
        r#"
[server]
port = 3030
path = "/remote/json"

[dispatch]
required_keys = ["session_id"]
discovery_aliases = ["map"]

[access]
remote_api_allowed = false
"#
    )
    .expect("write");
    let path = file.path().to_str().expect("utf8 path");
    let config = load_config(Some(path)).expect("load");
    assert_eq!(config.server.port, 3030);
    assert_eq!(config.server.path, "/remote/json");
    assert_eq!(config.dispatch.required_keys, ["session_id"]);
    assert_eq!(config.dispatch.discovery_aliases, ["map"]);
    assert!(!config.access.remote_api_allowed);
}

#[test]
fn load_rejects_unknown_section() {
    let mut file = NamedTempFile::new().expect("tempfile");
    write!(file, "[bogus]\nx = 1\n").expect("write");
    let path = file.path().to_str().expect("utf8 path");
    assert!(load_config(Some(path)).is_err());
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let path = path.to_str().expect("utf8 path");
    assert!(matches!(
        load_config(Some(path)),
        Err(jwrap_config::ConfigError::NotFound(p)) if p == path
    ));
}
