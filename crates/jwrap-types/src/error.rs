//! Fault types surfaced to callers in place of a success payload.

use std::fmt;

/// Machine-readable fault code carried in the `code` field of a fault
/// envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultCode {
    /// No method selector, or `Some(name)` when the target lacks it.
    MethodNotFound(Option<String>),
    /// A globally required key is absent from the active source.
    RequiredParameterNotFound(String),
    /// A method parameter without a default is absent from the request.
    MissingRequiredParameter(String),
    /// The callback identifier is not safe to embed in a script.
    InvalidCallback,
    /// The target handler panicked.
    Internal,
    /// Code reported by the target itself, forwarded verbatim.
    Remote(String),
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MethodNotFound(None) => f.write_str("MethodNotFound"),
            Self::MethodNotFound(Some(name)) => write!(f, "MethodNotFound({name})"),
            Self::RequiredParameterNotFound(key) => write!(f, "RequiredParameterNotFound({key})"),
            Self::MissingRequiredParameter(name) => write!(f, "MissingRequiredParameter({name})"),
            Self::InvalidCallback => f.write_str("InvalidCallback"),
            Self::Internal => f.write_str("InternalError"),
            Self::Remote(code) => f.write_str(code),
        }
    }
}

/// A failed request: what went wrong and the code a client can branch on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Fault classification.
    pub code: FaultCode,
    /// Human-readable message.
    pub message: String,
}

impl Fault {
    /// Creates a new `Fault`.
    pub fn new(code: FaultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The request carried no method selector.
    pub fn missing_selector() -> Self {
        Self::new(
            FaultCode::MethodNotFound(None),
            "You must provide a method key in the URL parameters with the name of the method you wish to execute.",
        )
    }

    /// The selected method is not part of the target's surface.
    pub fn method_not_found(name: &str) -> Self {
        Self::new(
            FaultCode::MethodNotFound(Some(name.to_string())),
            format!("The handler class does not contain the \"{name}\"."),
        )
    }

    /// A globally required key is missing; `location` names where it was expected.
    pub fn required_key_not_found(key: &str, location: &str) -> Self {
        Self::new(
            FaultCode::RequiredParameterNotFound(key.to_string()),
            format!("Missing required parameter \"{key}\" in your {location}."),
        )
    }

    /// A method-specific required parameter is missing.
    pub fn missing_required_parameter(name: &str) -> Self {
        Self::new(
            FaultCode::MissingRequiredParameter(name.to_string()),
            format!("Missing required parameter \"{name}\"."),
        )
    }

    /// The callback identifier cannot be embedded safely.
    pub fn invalid_callback() -> Self {
        Self::new(
            FaultCode::InvalidCallback,
            "The callback parameter must be a plain JavaScript identifier.",
        )
    }

    /// The target failed without reporting a code of its own.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FaultCode::Internal, message)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Fault {}

/// Failure signalled by a remote target method.
///
/// The code and message reach the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// Target-defined code.
    pub code: String,
    /// Target-defined message.
    pub message: String,
}

impl RemoteError {
    /// Creates a new `RemoteError`.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// A bound argument could not be converted to the type the method expects.
    pub fn invalid_argument(name: &str, detail: impl fmt::Display) -> Self {
        Self::new(
            format!("InvalidArgument({name})"),
            format!("Invalid value for parameter \"{name}\": {detail}"),
        )
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RemoteError {}

impl From<RemoteError> for Fault {
    fn from(e: RemoteError) -> Self {
        Fault::new(FaultCode::Remote(e.code), e.message)
    }
}
