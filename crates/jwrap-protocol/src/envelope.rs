//! Response envelopes and the JSON/JSONP writer.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use jwrap_types::{Fault, MethodCatalog, Outcome, ParameterDescriptor};

use crate::error::ProtocolError;
use crate::request::RequestMode;

/// `{"success": true, "response": ...}`
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<'a> {
    pub success: bool,
    pub response: &'a Value,
}

/// `{"success": false, "error": ..., "code": ...}`
#[derive(Debug, Serialize)]
pub struct FaultEnvelope {
    pub success: bool,
    pub error: String,
    pub code: String,
}

/// `{"methods": {"<name>": {"arguments": [...]}}}`
#[derive(Debug, Serialize)]
pub struct CatalogEnvelope<'a> {
    pub methods: BTreeMap<&'a str, CatalogEntry<'a>>,
}

/// One method in a discovery response.
#[derive(Debug, Serialize)]
pub struct CatalogEntry<'a> {
    pub arguments: &'a [ParameterDescriptor],
}

impl From<&Fault> for FaultEnvelope {
    fn from(f: &Fault) -> Self {
        Self {
            success: false,
            error: f.message.clone(),
            code: f.code.to_string(),
        }
    }
}

impl<'a> From<&'a MethodCatalog> for CatalogEnvelope<'a> {
    fn from(catalog: &'a MethodCatalog) -> Self {
        let methods = catalog
            .iter()
            .map(|m| {
                (
                    m.name(),
                    CatalogEntry {
                        arguments: m.parameters(),
                    },
                )
            })
            .collect();
        Self { methods }
    }
}

/// Serializes an outcome into its JSON envelope.
///
/// # Errors
///
/// Returns `ProtocolError::Serialize` if the payload cannot be encoded.
pub fn outcome_to_json(outcome: &Outcome) -> Result<String, ProtocolError> {
    let encoded = match outcome {
        Outcome::Success(value) => serde_json::to_string(&SuccessEnvelope {
            success: true,
            response: value,
        }),
        Outcome::Fault(fault) => serde_json::to_string(&FaultEnvelope::from(fault)),
        Outcome::Catalog(catalog) => serde_json::to_string(&CatalogEnvelope::from(catalog)),
    };
    encoded.map_err(ProtocolError::Serialize)
}

/// Content type signalled to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// `application/json`
    Json,
    /// `text/javascript`
    Script,
}

impl ContentType {
    /// MIME type string.
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Script => "text/javascript",
        }
    }
}

/// A fully rendered response body plus its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    /// Content type for the transport header.
    pub content_type: ContentType,
    /// Response body.
    pub body: String,
}

/// Renders `outcome` for the given mode.
///
/// Direct mode emits the JSON envelope as-is. Callback mode wraps it in a
/// guarded call so a script tag only runs it when the callback exists.
///
/// # Errors
///
/// Returns `ProtocolError::Serialize` if the payload cannot be encoded.
pub fn write_response(
    mode: &RequestMode,
    outcome: &Outcome,
) -> Result<RenderedResponse, ProtocolError> {
    let json = outcome_to_json(outcome)?;
    Ok(match mode {
        RequestMode::Direct => RenderedResponse {
            content_type: ContentType::Json,
            body: json,
        },
        RequestMode::Callback(cb) => RenderedResponse {
            content_type: ContentType::Script,
            body: format!("/**/\ntypeof {cb}==='function' && {cb}({json});"),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::CallbackName;
    use jwrap_types::MethodDescriptor;
    use serde_json::json;

    #[test]
    fn success_envelope_field_order() {
        let json = outcome_to_json(&Outcome::Success(json!(5))).expect("json");
        assert_eq!(json, r#"{"success":true,"response":5}"#);
    }

    #[test]
    fn null_response_is_still_success() {
        let json = outcome_to_json(&Outcome::Success(Value::Null)).expect("json");
        assert_eq!(json, r#"{"success":true,"response":null}"#);
    }

    #[test]
    fn fault_envelope_shape() {
        let json = outcome_to_json(&Outcome::Fault(Fault::method_not_found("missingMethod")))
            .expect("json");
        assert_eq!(
            json,
            r#"{"success":false,"error":"The handler class does not contain the \"missingMethod\".","code":"MethodNotFound(missingMethod)"}"#
        );
    }

    #[test]
    fn catalog_envelope_shape() {
        let catalog: MethodCatalog = vec![
            MethodDescriptor::new("ping", vec![]),
            MethodDescriptor::new(
                "greet",
                vec![
                    ParameterDescriptor::required("name"),
                    ParameterDescriptor::optional("greeting", "Hello"),
                ],
            ),
        ]
        .into_iter()
        .collect();
        let value: Value =
            serde_json::from_str(&outcome_to_json(&Outcome::Catalog(catalog)).expect("json"))
                .expect("parse");
        assert_eq!(
            value,
            json!({"methods": {
                "greet": {"arguments": [
                    {"name": "name", "required": true, "default": null},
                    {"name": "greeting", "required": false, "default": "Hello"}
                ]},
                "ping": {"arguments": []}
            }})
        );
    }

    #[test]
    fn direct_mode_is_json() {
        let out = write_response(&RequestMode::Direct, &Outcome::Success(json!(5))).expect("ok");
        assert_eq!(out.content_type, ContentType::Json);
        assert_eq!(out.body, r#"{"success":true,"response":5}"#);
    }

    #[test]
    fn callback_mode_wraps_in_guarded_call() {
        let mode = RequestMode::Callback(CallbackName::parse("cb").expect("cb"));
        let out = write_response(&mode, &Outcome::Success(json!("Hello, Ada"))).expect("ok");
        assert_eq!(out.content_type, ContentType::Script);
        assert_eq!(
            out.body,
            "/**/\ntypeof cb==='function' && cb({\"success\":true,\"response\":\"Hello, Ada\"});"
        );
    }
}
