//! Request parameter sources and mode selection.

use std::collections::BTreeMap;

use jwrap_types::Fault;
use serde_json::Value;

use crate::callback::CallbackName;
use crate::error::ProtocolError;
use crate::{CALLBACK_KEY, METHOD_KEY};

/// Name-keyed request parameters from a single transport location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag(BTreeMap<String, Value>);

impl ParameterBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `a=1&b=two` style parameters. Repeated keys keep the last value.
    pub fn from_urlencoded(input: &str) -> Result<Self, ProtocolError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(input)?;
        Ok(pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect())
    }

    /// Decodes a JSON object body; values keep their JSON types.
    pub fn from_json(body: &[u8]) -> Result<Self, ProtocolError> {
        match serde_json::from_slice(body).map_err(ProtocolError::Json)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ProtocolError::BodyNotObject {
                kind: json_kind(&other),
            }),
        }
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up a parameter by exact name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the parameter as a string slice if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns `true` if the key is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The two independent parameter sources a transport supplies.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    /// URL query parameters.
    pub query: ParameterBag,
    /// Body fields.
    pub body: ParameterBag,
}

/// How the request is read and how its response is shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMode {
    /// Parameters from the body, plain JSON response.
    Direct,
    /// Parameters from the URL, response wrapped in a call to the named function.
    Callback(CallbackName),
}

impl RequestMode {
    /// Describes where this mode reads its parameters, for fault messages.
    pub fn source_label(&self) -> &'static str {
        match self {
            Self::Direct => "POST data",
            Self::Callback(_) => "URL parameters",
        }
    }
}

/// A request after mode selection: one parameter source, one selector.
#[derive(Debug, Clone)]
pub struct NormalizedRequest {
    mode: RequestMode,
    selector: Option<String>,
    params: ParameterBag,
}

impl NormalizedRequest {
    /// Picks the request mode from the `callback` URL parameter.
    ///
    /// A callback other than `""` or `"0"` selects callback mode and makes
    /// the URL parameters the only source; otherwise the body is the only
    /// source.
    /// The method selector always comes from the URL.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidCallback` fault, meant to be written in direct
    /// mode, when the callback is not a plain identifier path.
    pub fn from_raw(raw: RawRequest) -> Result<Self, Fault> {
        let RawRequest { query, body } = raw;
        let selector = query.get(METHOD_KEY).map(value_to_selector);

        let callback = query
            .get_str(CALLBACK_KEY)
            .filter(|cb| !is_blank_callback(cb))
            .map(|cb| CallbackName::parse(cb).ok_or_else(Fault::invalid_callback))
            .transpose()?;

        Ok(match callback {
            Some(name) => Self {
                mode: RequestMode::Callback(name),
                selector,
                params: query,
            },
            None => Self {
                mode: RequestMode::Direct,
                selector,
                params: body,
            },
        })
    }

    /// Request mode.
    pub fn mode(&self) -> &RequestMode {
        &self.mode
    }

    /// Method selector from the URL, if one was sent.
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// The active parameter source.
    pub fn params(&self) -> &ParameterBag {
        &self.params
    }
}

/// Values a browser client uses to mean "no callback".
fn is_blank_callback(callback: &str) -> bool {
    callback.is_empty() || callback == "0"
}

fn value_to_selector(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwrap_types::FaultCode;
    use serde_json::json;

    fn raw(query: &str, body: &str) -> RawRequest {
        RawRequest {
            query: ParameterBag::from_urlencoded(query).expect("query"),
            body: ParameterBag::from_urlencoded(body).expect("body"),
        }
    }

    #[test]
    fn urlencoded_last_duplicate_wins() {
        let bag = ParameterBag::from_urlencoded("a=1&a=2&b=x%20y").expect("parse");
        assert_eq!(bag.get("a"), Some(&json!("2")));
        assert_eq!(bag.get_str("b"), Some("x y"));
    }

    #[test]
    fn json_body_keeps_types() {
        let bag = ParameterBag::from_json(br#"{"a":2,"b":[1,2]}"#).expect("parse");
        assert_eq!(bag.get("a"), Some(&json!(2)));
        assert_eq!(bag.get("b"), Some(&json!([1, 2])));
    }

    #[test]
    fn json_body_must_be_object() {
        let err = ParameterBag::from_json(b"[1,2]").expect_err("array body");
        assert!(matches!(err, ProtocolError::BodyNotObject { kind: "array" }));
    }

    #[test]
    fn no_callback_reads_body_only() {
        let req = NormalizedRequest::from_raw(raw("method=add&a=9", "a=2&b=3")).expect("ok");
        assert_eq!(req.mode(), &RequestMode::Direct);
        assert_eq!(req.selector(), Some("add"));
        assert_eq!(req.params().get_str("a"), Some("2"));
        assert!(!req.params().contains_key("method"));
    }

    #[test]
    fn empty_callback_is_direct() {
        let req = NormalizedRequest::from_raw(raw("method=add&callback=", "a=1")).expect("ok");
        assert_eq!(req.mode(), &RequestMode::Direct);
    }

    #[test]
    fn callback_reads_url_only() {
        let req =
            NormalizedRequest::from_raw(raw("method=greet&name=Ada&callback=cb", "name=Bob"))
                .expect("ok");
        assert!(matches!(req.mode(), RequestMode::Callback(cb) if cb.as_str() == "cb"));
        assert_eq!(req.params().get_str("name"), Some("Ada"));
    }

    #[test]
    fn unsafe_callback_is_rejected() {
        let fault =
            NormalizedRequest::from_raw(raw("method=x&callback=alert(1)", "")).expect_err("fault");
        assert_eq!(fault.code, FaultCode::InvalidCallback);
    }

    #[test]
    fn selector_absent_when_no_method_key() {
        let req = NormalizedRequest::from_raw(raw("", "method=add")).expect("ok");
        assert!(req.selector().is_none());
    }
}
