//! Named request parameters to positional call arguments.

use jwrap_protocol::ParameterBag;
use jwrap_types::{Fault, MethodDescriptor};

use crate::arguments::Arguments;
use crate::sanitize::{sanitize_value, strip_tags};

/// Binds `params` to the parameters of `method`, in declaration order.
///
/// Absent optional parameters take their declared default. Bag iteration
/// order plays no part.
///
/// # Errors
///
/// Returns a `MissingRequiredParameter` fault for the first required
/// parameter absent from `params`; nothing is bound in that case.
pub fn bind<'a>(
    method: &'a MethodDescriptor,
    params: &ParameterBag,
    sanitize_values: bool,
) -> Result<Arguments<'a>, Fault> {
    let mut values = Vec::with_capacity(method.arity());
    for parameter in method.parameters() {
        let key = strip_tags(parameter.name());
        let value = match (params.get(&key), parameter.default_value()) {
            (Some(v), _) if sanitize_values => sanitize_value(v.clone()),
            (Some(v), _) => v.clone(),
            (None, Some(default)) => default.clone(),
            (None, None) => return Err(Fault::missing_required_parameter(parameter.name())),
        };
        values.push(value);
    }
    Ok(Arguments::new(method.parameters(), values))
}
