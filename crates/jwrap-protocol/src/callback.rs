//! Callback identifier accepted in JSONP mode.

use std::fmt;

/// Longest callback identifier accepted, in bytes.
pub const MAX_CALLBACK_LEN: usize = 128;

/// A JSONP callback name that is safe to interpolate into a script.
///
/// Accepts a dotted path of JavaScript identifiers such as `cb`,
/// `jQuery_123` or `app.handlers.onData`. Anything else (brackets,
/// parentheses, quotes, whitespace) is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackName(String);

impl CallbackName {
    /// Validates `raw` as a callback identifier.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.len() > MAX_CALLBACK_LEN {
            return None;
        }
        if raw.split('.').all(is_identifier) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallbackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_accepted() {
        assert_eq!(CallbackName::parse("cb").expect("valid").as_str(), "cb");
    }

    #[test]
    fn dotted_path_accepted() {
        assert!(CallbackName::parse("app.handlers.onData").is_some());
        assert!(CallbackName::parse("jQuery_171$x").is_some());
    }

    #[test]
    fn script_fragments_rejected() {
        for raw in [
            "alert(1)",
            "cb;alert(1)//",
            "a b",
            "cb[0]",
            "</script>",
            "1cb",
            "a..b",
            ".cb",
            "cb.",
            "",
        ] {
            assert!(CallbackName::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn overlong_identifier_rejected() {
        let raw = "a".repeat(MAX_CALLBACK_LEN + 1);
        assert!(CallbackName::parse(&raw).is_none());
        assert!(CallbackName::parse(&raw[..MAX_CALLBACK_LEN]).is_some());
    }
}
