//! # jwrap-dispatch
//!
//! Dispatch core (APPLICATION layer).
//!
//! A target declares its methods in a [`MethodRegistry`]; a per-request
//! [`Dispatcher`] validates the request, binds named parameters to
//! positional arguments, invokes the method and returns one [`Outcome`].
//!
//! [`Outcome`]: jwrap_types::Outcome

pub mod arguments;
pub mod binder;
pub mod dispatcher;
pub mod registry;
pub mod sanitize;
pub mod settings;

pub use arguments::Arguments;
pub use binder::bind;
pub use dispatcher::Dispatcher;
pub use registry::{MethodFn, MethodRegistry, RegistryError, RemoteTarget};
pub use settings::{DispatchSettings, DEFAULT_DISCOVERY_ALIASES};
