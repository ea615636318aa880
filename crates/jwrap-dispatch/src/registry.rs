//! Explicit method registry for a remote target.
//!
//! A target declares its callable surface once, at startup, through
//! [`RemoteTarget::register`]. The registry checks the declaration and
//! serves both the discovery catalog and the handler lookup.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use jwrap_types::{MethodCatalog, MethodDescriptor, ParameterDescriptor, RemoteError};

use crate::arguments::Arguments;
use crate::sanitize::strip_tags;
use crate::settings::DispatchSettings;

/// Type-erased method handler.
pub type MethodFn<T> = Box<dyn Fn(&T, &Arguments<'_>) -> Result<Value, RemoteError> + Send + Sync>;

/// An object whose methods are exposed through the endpoint.
pub trait RemoteTarget: Send + Sync + Sized + 'static {
    /// Declares every remotely invocable method.
    ///
    /// # Errors
    ///
    /// Returns a `RegistryError` if the declaration is inconsistent.
    fn register(registry: &mut MethodRegistry<Self>) -> Result<(), RegistryError>;
}

/// Inconsistent method declarations, caught at registration time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Method or parameter name is empty.
    #[error("empty {what} name in method '{method}'")]
    EmptyName { what: &'static str, method: String },
    /// The method was registered twice.
    #[error("method '{0}' is already registered")]
    DuplicateMethod(String),
    /// Two parameters of one method share a name.
    #[error("method '{method}' declares parameter '{parameter}' twice")]
    DuplicateParameter { method: String, parameter: String },
    /// A required parameter follows an optional one.
    #[error("method '{method}': required parameter '{parameter}' follows an optional one")]
    RequiredAfterOptional { method: String, parameter: String },
    /// The name contains markup and could never be matched by a request.
    #[error("name '{0}' contains markup")]
    MarkupInName(String),
    /// The method name is shadowed by a discovery alias.
    #[error("method '{0}' collides with a discovery alias")]
    ReservedName(String),
}

struct Entry<T> {
    descriptor: MethodDescriptor,
    handler: MethodFn<T>,
}

/// Methods of one target type, keyed by name.
pub struct MethodRegistry<T> {
    entries: HashMap<String, Entry<T>>,
    catalog: MethodCatalog,
    reserved: Vec<String>,
}

impl<T: 'static> MethodRegistry<T> {
    /// Creates an empty registry that refuses the configured discovery aliases.
    pub fn new(settings: &DispatchSettings) -> Self {
        Self {
            entries: HashMap::new(),
            catalog: MethodCatalog::new(),
            reserved: settings.discovery_aliases().to_vec(),
        }
    }

    /// Registers a method.
    ///
    /// `parameters` fixes the positional order in which `handler` receives
    /// its arguments.
    ///
    /// # Errors
    ///
    /// Returns a `RegistryError` if the name is taken, reserved or carries
    /// markup, or if the parameter list is inconsistent.
    pub fn method<F, R>(
        &mut self,
        name: &str,
        parameters: Vec<ParameterDescriptor>,
        handler: F,
    ) -> Result<&mut Self, RegistryError>
    where
        F: Fn(&T, &Arguments<'_>) -> Result<R, RemoteError> + Send + Sync + 'static,
        R: Serialize + 'static,
    {
        self.check_method_name(name)?;
        check_parameters(name, &parameters)?;

        let handler: MethodFn<T> = Box::new(move |target: &T, args: &Arguments<'_>| {
            let out = handler(target, args)?;
            serde_json::to_value(out)
                .map_err(|e| RemoteError::new("SerializationFailed", e.to_string()))
        });
        let descriptor = MethodDescriptor::new(name, parameters);
        self.catalog.insert(descriptor.clone());
        self.entries
            .insert(name.to_string(), Entry { descriptor, handler });
        Ok(self)
    }

    /// Descriptor of a registered method.
    pub fn descriptor(&self, name: &str) -> Option<&MethodDescriptor> {
        self.entries.get(name).map(|e| &e.descriptor)
    }

    /// Returns `true` if `name` is a registered method.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The discovery catalog, sorted by method name.
    pub fn catalog(&self) -> &MethodCatalog {
        &self.catalog
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn handler(&self, name: &str) -> Option<&MethodFn<T>> {
        self.entries.get(name).map(|e| &e.handler)
    }

    fn check_method_name(&self, name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName {
                what: "method",
                method: String::new(),
            });
        }
        if strip_tags(name) != name {
            return Err(RegistryError::MarkupInName(name.to_string()));
        }
        if self.reserved.iter().any(|a| a.eq_ignore_ascii_case(name)) {
            return Err(RegistryError::ReservedName(name.to_string()));
        }
        if self.entries.contains_key(name) {
            return Err(RegistryError::DuplicateMethod(name.to_string()));
        }
        Ok(())
    }
}

impl<T: RemoteTarget> MethodRegistry<T> {
    /// Builds the registry declared by `T`.
    ///
    /// # Errors
    ///
    /// Propagates the first `RegistryError` raised by `T::register`.
    pub fn for_target(settings: &DispatchSettings) -> Result<Self, RegistryError> {
        let mut registry = Self::new(settings);
        T::register(&mut registry)?;
        tracing::debug!(methods = registry.len(), "method registry built");
        Ok(registry)
    }
}

impl<T> fmt::Debug for MethodRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

fn check_parameters(method: &str, parameters: &[ParameterDescriptor]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    let mut optional_seen = false;
    for p in parameters {
        let name = p.name();
        if name.is_empty() {
            return Err(RegistryError::EmptyName {
                what: "parameter",
                method: method.to_string(),
            });
        }
        if strip_tags(name) != name {
            return Err(RegistryError::MarkupInName(name.to_string()));
        }
        if !seen.insert(name) {
            return Err(RegistryError::DuplicateParameter {
                method: method.to_string(),
                parameter: name.to_string(),
            });
        }
        if p.is_required() && optional_seen {
            return Err(RegistryError::RequiredAfterOptional {
                method: method.to_string(),
                parameter: name.to_string(),
            });
        }
        optional_seen |= !p.is_required();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwrap_types::ParameterDescriptor as P;

    struct Nothing;

    fn registry() -> MethodRegistry<Nothing> {
        MethodRegistry::new(&DispatchSettings::default())
    }

    fn ok(_: &Nothing, _: &Arguments<'_>) -> Result<(), RemoteError> {
        Ok(())
    }

    #[test]
    fn registered_method_is_in_catalog() {
        let mut r = registry();
        r.method("ping", vec![], ok).expect("register");
        assert!(r.contains("ping"));
        assert_eq!(r.catalog().get("ping").expect("ping").arity(), 0);
    }

    #[test]
    fn duplicate_method_rejected() {
        let mut r = registry();
        r.method("ping", vec![], ok).expect("first");
        assert_eq!(
            r.method("ping", vec![], ok).err(),
            Some(RegistryError::DuplicateMethod("ping".into()))
        );
    }

    #[test]
    fn discovery_alias_is_reserved_case_insensitively() {
        let mut r = registry();
        assert!(matches!(
            r.method("Methods", vec![], ok),
            Err(RegistryError::ReservedName(_))
        ));
    }

    #[test]
    fn required_after_optional_rejected() {
        let mut r = registry();
        let err = r
            .method("f", vec![P::optional("a", 1), P::required("b")], ok)
            .err();
        assert!(matches!(err, Some(RegistryError::RequiredAfterOptional { .. })));
    }

    #[test]
    fn duplicate_parameter_rejected() {
        let mut r = registry();
        let err = r
            .method("f", vec![P::required("a"), P::required("a")], ok)
            .err();
        assert!(matches!(err, Some(RegistryError::DuplicateParameter { .. })));
    }

    #[test]
    fn markup_in_names_rejected() {
        let mut r = registry();
        assert!(matches!(
            r.method("<b>f</b>", vec![], ok),
            Err(RegistryError::MarkupInName(_))
        ));
        assert!(matches!(
            r.method("f", vec![P::required("<i>a")], ok),
            Err(RegistryError::MarkupInName(_))
        ));
    }

    #[test]
    fn empty_names_rejected() {
        let mut r = registry();
        assert!(matches!(
            r.method("", vec![], ok),
            Err(RegistryError::EmptyName { what: "method", .. })
        ));
        assert!(matches!(
            r.method("f", vec![P::required("")], ok),
            Err(RegistryError::EmptyName { what: "parameter", .. })
        ));
    }

    #[test]
    fn rejected_method_leaves_registry_unchanged() {
        let mut r = registry();
        let _ = r.method("f", vec![P::required("a"), P::required("a")], ok);
        assert!(r.is_empty());
        assert!(r.catalog().is_empty());
    }
}
