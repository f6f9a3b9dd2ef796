use serde_json::Value;

use crate::error::LoadError;

/// Argument name → raw value, as handed over by the query engine.
///
/// Read-only to the loader. Values may have any shape; only converters
/// look inside them.
pub type RawArgs = serde_json::Map<String, Value>;

/// Take the object map out of a whole request document.
pub fn raw_args_from(value: Value) -> Result<RawArgs, LoadError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(LoadError::NotAnObject(describe(&other))),
    }
}

/// Short kind name of a raw value, for diagnostics.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
