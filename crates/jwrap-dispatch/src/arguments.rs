//! Positional arguments handed to a method handler.

use serde::de::DeserializeOwned;
use serde_json::Value;

use jwrap_types::{ParameterDescriptor, RemoteError};

/// Bound arguments, one slot per declared parameter.
#[derive(Debug, Clone)]
pub struct Arguments<'a> {
    parameters: &'a [ParameterDescriptor],
    values: Vec<Value>,
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(parameters: &'a [ParameterDescriptor], values: Vec<Value>) -> Self {
        debug_assert_eq!(parameters.len(), values.len());
        Self { parameters, values }
    }

    /// Raw value at `index`.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Converts the value at `index` to `T`.
    ///
    /// Request transports are loosely typed, so a string holding JSON of
    /// the right shape (`"2"` for a number, `"true"` for a bool) is
    /// accepted as well.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` `RemoteError` when the slot does not
    /// exist or the value does not convert.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T, RemoteError> {
        let name = self.name(index);
        let value = self
            .values
            .get(index)
            .ok_or_else(|| RemoteError::invalid_argument(&name, "no such position"))?;

        match T::deserialize(value) {
            Ok(v) => Ok(v),
            Err(e) => {
                if let Value::String(s) = value {
                    if let Ok(v) = serde_json::from_str::<T>(s) {
                        return Ok(v);
                    }
                }
                Err(RemoteError::invalid_argument(&name, e))
            }
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a parameterless method.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in positional order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    fn name(&self, index: usize) -> String {
        self.parameters
            .get(index)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| format!("#{index}"))
    }
}
