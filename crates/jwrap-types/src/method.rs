//! Method and parameter descriptors exposed by a remote target.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A single positional parameter of a remote method.
///
/// A parameter is required exactly when it declares no default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    name: String,
    required: bool,
    default: Option<Value>,
}

impl ParameterDescriptor {
    /// Declares a required parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
        }
    }

    /// Declares an optional parameter bound to `default` when absent.
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: Some(default.into()),
        }
    }

    /// Parameter name as looked up in the request.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the request must carry this parameter.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Declared default, `None` for required parameters.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// A remote method and its parameters in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDescriptor {
    name: String,
    parameters: Vec<ParameterDescriptor>,
}

impl MethodDescriptor {
    /// Creates a descriptor. Parameter order is the positional call order.
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Number of positional slots a call needs.
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// Every invocable method of a target, keyed by name.
///
/// Iteration is sorted by method name so repeated discovery responses
/// for the same target are identical.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodCatalog {
    methods: BTreeMap<String, MethodDescriptor>,
}

impl MethodCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor, replacing any previous one with the same name.
    pub fn insert(&mut self, descriptor: MethodDescriptor) {
        self.methods
            .insert(descriptor.name().to_string(), descriptor);
    }

    /// Looks up a method by exact name.
    pub fn get(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    /// Returns `true` if a method with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Iterates descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.values()
    }

    /// Number of methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if the catalog has no methods.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl FromIterator<MethodDescriptor> for MethodCatalog {
    fn from_iter<I: IntoIterator<Item = MethodDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for descriptor in iter {
            catalog.insert(descriptor);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_parameter_has_no_default() {
        let p = ParameterDescriptor::required("a");
        assert!(p.is_required());
        assert!(p.default_value().is_none());
    }

    #[test]
    fn optional_parameter_keeps_default() {
        let p = ParameterDescriptor::optional("greeting", "Hello");
        assert!(!p.is_required());
        assert_eq!(p.default_value(), Some(&json!("Hello")));
    }

    #[test]
    fn zero_parameter_method_has_empty_list() {
        let m = MethodDescriptor::new("ping", vec![]);
        assert_eq!(m.arity(), 0);
        assert!(m.parameters().is_empty());
    }

    #[test]
    fn catalog_iterates_in_name_order() {
        let catalog: MethodCatalog = ["zeta", "alpha", "mid"]
            .into_iter()
            .map(|n| MethodDescriptor::new(n, vec![]))
            .collect();
        let names: Vec<&str> = catalog.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn parameter_serializes_null_default_when_required() {
        let v = serde_json::to_value(ParameterDescriptor::required("a")).expect("ser");
        assert_eq!(v, json!({"name": "a", "required": true, "default": null}));
    }
}
