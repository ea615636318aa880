//! Shared helpers used across CLI commands.
//!
//! Centralises turning the loaded configuration into dispatch settings
//! and building the demo target's registry, so every command sees the
//! same surface.

use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;

use jwrap_config::schema::{AccessConfig, DispatchConfig};
use jwrap_config::JwrapConfig;
use jwrap_dispatch::{DispatchSettings, Dispatcher, MethodRegistry};
use jwrap_protocol::{ParameterBag, RawRequest, RenderedResponse};
use jwrap_transport_http::{AccessPolicy, AppState};

use crate::demo::DemoRemote;

/// Maps the `[dispatch]` section onto core settings.
pub fn dispatch_settings(config: &DispatchConfig) -> DispatchSettings {
    DispatchSettings::new(
        config.required_keys.clone(),
        config.discovery_aliases.clone(),
        config.sanitize_values,
    )
}

/// Maps the `[access]` section onto the transport gate.
pub fn access_policy(config: &AccessConfig) -> AccessPolicy {
    AccessPolicy {
        remote_api_allowed: config.remote_api_allowed,
        demo_mode: config.demo_mode,
    }
}

/// Builds the demo target's method registry.
///
/// # Errors
///
/// Returns an error if the demo declaration conflicts with the configured
/// discovery aliases.
pub fn demo_registry(settings: &DispatchSettings) -> anyhow::Result<MethodRegistry<DemoRemote>> {
    MethodRegistry::for_target(settings).context("invalid method registry")
}

/// Builds the shared HTTP state for the demo target.
///
/// # Errors
///
/// Returns an error if the registry cannot be built.
pub fn demo_state(config: &JwrapConfig) -> anyhow::Result<AppState<DemoRemote>> {
    let settings = dispatch_settings(&config.dispatch);
    let registry = demo_registry(&settings)?;
    Ok(AppState {
        target: Arc::new(DemoRemote),
        registry: Arc::new(registry),
        settings: Arc::new(settings),
        access: access_policy(&config.access),
    })
}

/// Runs one request against the demo target and returns the rendered body.
///
/// # Errors
///
/// Returns an error if the registry cannot be built or the outcome cannot
/// be serialized.
pub fn run_once(config: &JwrapConfig, raw: RawRequest) -> anyhow::Result<RenderedResponse> {
    let settings = dispatch_settings(&config.dispatch);
    let registry = demo_registry(&settings)?;
    let out = Dispatcher::new(&DemoRemote, &registry, &settings).handle(raw)?;
    Ok(out)
}

/// Parses `key=value` arguments into a bag of string values.
///
/// # Errors
///
/// Returns an error for an argument without `=` or with an empty key.
pub fn parse_pairs(pairs: &[String]) -> anyhow::Result<ParameterBag> {
    let mut bag = ParameterBag::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("expected key=value, got '{pair}'"))?;
        anyhow::ensure!(!key.is_empty(), "empty parameter name in '{pair}'");
        bag.insert(key, Value::String(value.to_string()));
    }
    Ok(bag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pairs_splits_on_first_equals() {
        let bag = parse_pairs(&["a=1".into(), "expr=x=y".into()]).expect("parse");
        assert_eq!(bag.get_str("a"), Some("1"));
        assert_eq!(bag.get_str("expr"), Some("x=y"));
    }

    #[test]
    fn parse_pairs_rejects_bare_word() {
        assert!(parse_pairs(&["oops".into()]).is_err());
        assert!(parse_pairs(&["=1".into()]).is_err());
    }

    #[test]
    fn settings_follow_config() {
        let config = DispatchConfig {
            required_keys: vec!["token".into()],
            discovery_aliases: vec!["map".into()],
            sanitize_values: false,
        };
        let settings = dispatch_settings(&config);
        assert_eq!(settings.required_keys(), ["method".to_string(), "token".to_string()]);
        assert!(!settings.sanitize_values());
        assert!(settings.is_discovery("MAP"));
        assert!(!settings.is_discovery("wsdl"));
    }

    #[test]
    fn run_once_direct_add() {
        let mut query = ParameterBag::new();
        query.insert("method", "add");
        let raw = RawRequest {
            query,
            body: parse_pairs(&["a=2".into(), "b=3".into()]).expect("body"),
        };
        let out = run_once(&JwrapConfig::default(), raw).expect("run");
        assert_eq!(out.body, r#"{"success":true,"response":5}"#);
    }
}
