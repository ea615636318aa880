//! # jwrap-types
//!
//! Domain types for the jwrap dispatch core.
//! This crate contains pure data types with no dependencies beyond
//! serde for serialization.

pub mod error;
pub mod method;
pub mod outcome;

// Re-exports for convenience.
pub use error::{Fault, FaultCode, RemoteError};
pub use method::{MethodCatalog, MethodDescriptor, ParameterDescriptor};
pub use outcome::Outcome;
