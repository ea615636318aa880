//! # jwrap-protocol
//!
//! Wire format of the jwrap endpoint.
//! Decides how a request is read (direct JSON or JSONP callback) and how
//! an outcome is written back.

pub mod callback;
pub mod envelope;
pub mod error;
pub mod request;

pub use callback::CallbackName;
pub use envelope::{write_response, ContentType, RenderedResponse};
pub use error::ProtocolError;
pub use request::{NormalizedRequest, ParameterBag, RawRequest, RequestMode};

/// URL parameter naming the method to invoke.
pub const METHOD_KEY: &str = "method";

/// URL parameter that switches a request into callback mode.
pub const CALLBACK_KEY: &str = "callback";
