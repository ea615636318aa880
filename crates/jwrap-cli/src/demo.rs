//! Bundled demo target served by `jwrap serve`.

use serde_json::Value;

use jwrap_dispatch::{Arguments, MethodRegistry, RegistryError, RemoteTarget};
use jwrap_types::{ParameterDescriptor as P, RemoteError};

/// A small calculator/greeter used to try the endpoint out.
#[derive(Debug, Default)]
pub struct DemoRemote;

impl DemoRemote {
    fn add(&self, a: i64, b: i64) -> Result<i64, RemoteError> {
        a.checked_add(b)
            .ok_or_else(|| RemoteError::new("Overflow", "sum does not fit in 64 bits"))
    }

    fn divide(&self, a: f64, b: f64) -> Result<f64, RemoteError> {
        if b == 0.0 {
            return Err(RemoteError::new("DivisionByZero", "cannot divide by zero"));
        }
        Ok(a / b)
    }

    fn greet(&self, name: &str, greeting: &str) -> String {
        format!("{greeting}, {name}")
    }
}

impl RemoteTarget for DemoRemote {
    fn register(registry: &mut MethodRegistry<Self>) -> Result<(), RegistryError> {
        registry
            .method(
                "add",
                vec![P::required("a"), P::required("b")],
                |t: &DemoRemote, args: &Arguments<'_>| t.add(args.get(0)?, args.get(1)?),
            )?
            .method(
                "divide",
                vec![P::required("a"), P::required("b")],
                |t: &DemoRemote, args: &Arguments<'_>| t.divide(args.get(0)?, args.get(1)?),
            )?
            .method(
                "greet",
                vec![P::required("name"), P::optional("greeting", "Hello")],
                |t: &DemoRemote, args: &Arguments<'_>| {
                    let name: String = args.get(0)?;
                    let greeting: String = args.get(1)?;
                    Ok(t.greet(&name, &greeting))
                },
            )?
            .method(
                "echo",
                vec![P::required("value")],
                |_: &DemoRemote, args: &Arguments<'_>| {
                    Ok(args.value(0).cloned().unwrap_or(Value::Null))
                },
            )?;
        Ok(())
    }
}
