use serde_json::Value;

use crate::error::LoadError;
use crate::registry::ArgLoader;
use crate::wire::WireType;

impl ArgLoader {
    /// A registry with the built-in scalar converters enabled.
    ///
    /// # Panics
    ///
    /// Panics if a built-in converter cannot be registered. That can only
    /// happen through a programming mistake in this crate.
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(loader) => loader,
            Err(e) => panic!("could not init default loader: {e}"),
        }
    }

    /// Same as [`ArgLoader::new`], returning the bootstrap error instead.
    pub fn try_new() -> Result<Self, LoadError> {
        let mut loader = Self::empty();
        loader.register(load_bool, WireType::Boolean)?;
        loader.register(load_string, WireType::String)?;
        loader.register(load_int, WireType::Int)?;
        loader.register(load_float, WireType::Float)?;
        Ok(loader)
    }
}

impl Default for ArgLoader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_bool(raw: &Value) -> Result<bool, String> {
    raw.as_bool().ok_or_else(|| format!("{raw} is not a bool"))
}

pub fn load_string(raw: &Value) -> Result<String, String> {
    raw.as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("{raw} is not a string"))
}

/// Only numbers held as signed 64-bit integers; floats are never truncated.
pub fn load_int(raw: &Value) -> Result<i64, String> {
    raw.as_i64().ok_or_else(|| format!("{raw} is not an int"))
}

/// Only numbers held as floating point; integers are not widened.
pub fn load_float(raw: &Value) -> Result<f64, String> {
    raw.as_number()
        .filter(|n| n.is_f64())
        .and_then(|n| n.as_f64())
        .ok_or_else(|| format!("{raw} is not a float"))
}
