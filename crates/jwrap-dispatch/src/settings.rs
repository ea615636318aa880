//! Knobs of the dispatch core.

use jwrap_protocol::METHOD_KEY;

/// Default discovery aliases.
pub const DEFAULT_DISCOVERY_ALIASES: [&str; 3] = ["map", "methods", "wsdl"];

/// Dispatch behaviour shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    required_keys: Vec<String>,
    discovery_aliases: Vec<String>,
    sanitize_values: bool,
}

impl DispatchSettings {
    /// Creates settings.
    ///
    /// The method selector is always required, whether or not
    /// `required_keys` lists it.
    pub fn new(
        required_keys: Vec<String>,
        discovery_aliases: Vec<String>,
        sanitize_values: bool,
    ) -> Self {
        let mut keys = vec![METHOD_KEY.to_string()];
        keys.extend(required_keys.into_iter().filter(|k| k != METHOD_KEY));
        Self {
            required_keys: keys,
            discovery_aliases,
            sanitize_values,
        }
    }

    /// Keys that must be present on every request, selector first.
    pub fn required_keys(&self) -> &[String] {
        &self.required_keys
    }

    /// Selectors answered with the method catalog.
    pub fn discovery_aliases(&self) -> &[String] {
        &self.discovery_aliases
    }

    /// Whether string argument values are stripped of markup.
    pub fn sanitize_values(&self) -> bool {
        self.sanitize_values
    }

    /// Case-insensitive match against the discovery aliases.
    pub fn is_discovery(&self, selector: &str) -> bool {
        self.discovery_aliases
            .iter()
            .any(|a| a.eq_ignore_ascii_case(selector))
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::new(
            Vec::new(),
            DEFAULT_DISCOVERY_ALIASES.iter().map(|a| a.to_string()).collect(),
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_is_always_first_required_key() {
        let s = DispatchSettings::new(vec!["token".into(), "method".into()], vec![], true);
        assert_eq!(s.required_keys(), ["method".to_string(), "token".to_string()]);
    }

    #[test]
    fn discovery_match_is_case_insensitive_and_whole() {
        let s = DispatchSettings::default();
        assert!(s.is_discovery("MAP"));
        assert!(s.is_discovery("Wsdl"));
        assert!(!s.is_discovery("methodsx"));
        assert!(!s.is_discovery("map "));
    }
}
