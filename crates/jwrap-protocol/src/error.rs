//! Protocol-layer error types.

use thiserror::Error;

/// Errors from decoding request parameters or encoding a response.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A URL-encoded parameter string could not be decoded.
    #[error("invalid url-encoded parameters: {0}")]
    UrlEncoded(#[from] serde_urlencoded::de::Error),
    /// A JSON body could not be parsed.
    #[error("invalid JSON body: {0}")]
    Json(#[source] serde_json::Error),
    /// A JSON body parsed, but is not an object.
    #[error("JSON body must be an object, got {kind}")]
    BodyNotObject { kind: &'static str },
    /// The outcome could not be serialized.
    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),
}
