//! The single result of handling one request.

use serde_json::Value;

use crate::error::Fault;
use crate::method::MethodCatalog;

/// What the dispatch core produced for a request.
///
/// Exactly one variant exists per request; the envelope writer is its only
/// consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The method returned a value (possibly `null`).
    Success(Value),
    /// The request failed at some stage.
    Fault(Fault),
    /// A discovery request; the catalog is the payload.
    Catalog(MethodCatalog),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Fault`].
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Returns the fault, if any.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(f) => Some(f),
            _ => None,
        }
    }
}

impl From<Fault> for Outcome {
    fn from(f: Fault) -> Self {
        Self::Fault(f)
    }
}

impl From<Result<Value, Fault>> for Outcome {
    fn from(r: Result<Value, Fault>) -> Self {
        match r {
            Ok(v) => Self::Success(v),
            Err(f) => Self::Fault(f),
        }
    }
}
