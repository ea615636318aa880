//! Request-scoped dispatcher: checks, binds, invokes, and shapes the outcome.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, error, warn};

use jwrap_protocol::{
    write_response, NormalizedRequest, ProtocolError, RawRequest, RenderedResponse, RequestMode,
    METHOD_KEY,
};
use jwrap_types::{Fault, Outcome};

use crate::arguments::Arguments;
use crate::binder::bind;
use crate::registry::MethodRegistry;
use crate::settings::DispatchSettings;

/// Handles one request against a target.
///
/// Borrows everything it needs; build a fresh one for each request.
pub struct Dispatcher<'a, T> {
    target: &'a T,
    registry: &'a MethodRegistry<T>,
    settings: &'a DispatchSettings,
}

impl<'a, T: 'static> Dispatcher<'a, T> {
    /// Creates a dispatcher over `target` and its registry.
    pub fn new(
        target: &'a T,
        registry: &'a MethodRegistry<T>,
        settings: &'a DispatchSettings,
    ) -> Self {
        Self {
            target,
            registry,
            settings,
        }
    }

    /// Runs a raw request through normalization, dispatch and rendering.
    ///
    /// A rejected callback is reported as a direct JSON fault since it
    /// cannot be embedded.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Serialize` only if the outcome cannot be encoded.
    pub fn handle(&self, raw: RawRequest) -> Result<RenderedResponse, ProtocolError> {
        match NormalizedRequest::from_raw(raw) {
            Ok(request) => {
                let outcome = self.dispatch(&request);
                write_response(request.mode(), &outcome)
            }
            Err(fault) => {
                warn!(code = %fault.code, "rejected callback identifier");
                write_response(&RequestMode::Direct, &Outcome::Fault(fault))
            }
        }
    }

    /// Dispatches a normalized request. Never panics on target failure.
    pub fn dispatch(&self, request: &NormalizedRequest) -> Outcome {
        match self.try_dispatch(request) {
            Ok(outcome) => outcome,
            Err(fault) => {
                warn!(code = %fault.code, message = %fault.message, "request faulted");
                Outcome::Fault(fault)
            }
        }
    }

    fn try_dispatch(&self, request: &NormalizedRequest) -> Result<Outcome, Fault> {
        let selector = self.ensure_parameters(request)?;

        if self.settings.is_discovery(selector) {
            debug!(selector, "serving method catalog");
            return Ok(Outcome::Catalog(self.registry.catalog().clone()));
        }

        let descriptor = self
            .registry
            .descriptor(selector)
            .ok_or_else(|| Fault::method_not_found(selector))?;
        let args = bind(descriptor, request.params(), self.settings.sanitize_values())?;

        debug!(method = selector, mode = ?request.mode(), arity = args.len(), "invoking method");
        self.invoke(selector, &args).map(Outcome::Success)
    }

    /// Checks the always-required keys; returns the method selector.
    fn ensure_parameters<'r>(&self, request: &'r NormalizedRequest) -> Result<&'r str, Fault> {
        let selector = request.selector().ok_or_else(Fault::missing_selector)?;
        for key in self.settings.required_keys() {
            if key != METHOD_KEY && !request.params().contains_key(key) {
                return Err(Fault::required_key_not_found(
                    key,
                    request.mode().source_label(),
                ));
            }
        }
        Ok(selector)
    }

    fn invoke(&self, name: &str, args: &Arguments<'_>) -> Result<Value, Fault> {
        let handler = self
            .registry
            .handler(name)
            .ok_or_else(|| Fault::method_not_found(name))?;

        match panic::catch_unwind(AssertUnwindSafe(|| handler(self.target, args))) {
            Ok(result) => result.map_err(Fault::from),
            Err(payload) => {
                error!(method = name, panic = panic_message(payload.as_ref()), "handler panicked");
                Err(Fault::internal(format!(
                    "The \"{name}\" method failed unexpectedly."
                )))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
