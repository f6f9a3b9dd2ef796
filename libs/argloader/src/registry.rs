use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use crate::error::{ConvertError, LoadError};
use crate::wire::WireType;

type ConvertFn = dyn Fn(&Value) -> Result<Box<dyn Any>, ConvertError> + Send + Sync;

/// A registered converter, wrapped so that it never unwinds.
///
/// Whatever the inner function does, `convert()` returns either the boxed
/// value of the registered type or a `ConvertError`.
pub struct Converter {
    name: &'static str,
    type_name: &'static str,
    call: Box<ConvertFn>,
}

impl Converter {
    /// Diagnostic identifier of the registered function.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the type this converter produces.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn convert(&self, raw: &Value) -> Result<Box<dyn Any>, ConvertError> {
        (self.call)(raw)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Registry of converters keyed by the type they produce.
///
/// Reads only through `&self`, so any number of schema/load calls may share
/// one instance. Registration takes `&mut self`: finish it before sharing.
pub struct ArgLoader {
    /// Type → function turning a raw value into a boxed value of that type.
    converters: HashMap<TypeId, Converter>,
    /// Type → wire type declared for arguments of that type.
    wire_types: HashMap<TypeId, WireType>,
}

impl ArgLoader {
    /// A registry with no converters at all.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
            wire_types: HashMap::new(),
        }
    }

    /// Register `f` as the converter for `T`, declared to the schema as `wire_type`.
    ///
    /// Fails if a converter for `T` already exists; the earlier one stays.
    pub fn register<T, F, E>(&mut self, f: F, wire_type: WireType) -> Result<(), LoadError>
    where
        T: Any,
        F: Fn(&Value) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let key = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();
        let name = std::any::type_name::<F>();

        if self.converters.contains_key(&key) {
            return Err(LoadError::DuplicateConverter {
                type_name,
                converter: name,
            });
        }

        let call = move |raw: &Value| -> Result<Box<dyn Any>, ConvertError> {
            // Rendering the error runs user code too, so it stays inside the boundary.
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                f(raw)
                    .map(|value| Box::new(value) as Box<dyn Any>)
                    .map_err(|e| e.to_string())
            }));
            match outcome {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(message)) => Err(ConvertError::Rejected(message)),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::warn!(converter = name, %message, "converter panicked");
                    Err(ConvertError::Panicked {
                        converter: name.to_string(),
                        message,
                    })
                }
            }
        };

        tracing::debug!(ty = type_name, wire_type = %wire_type, converter = name, "registered converter");
        self.converters.insert(
            key,
            Converter {
                name,
                type_name,
                call: Box::new(call),
            },
        );
        self.wire_types.insert(key, wire_type);
        Ok(())
    }

    pub fn converter(&self, ty: TypeId) -> Option<&Converter> {
        self.converters.get(&ty)
    }

    pub fn wire_type(&self, ty: TypeId) -> Option<&WireType> {
        self.wire_types.get(&ty)
    }

    pub fn converter_for<T: Any>(&self) -> Option<&Converter> {
        self.converter(TypeId::of::<T>())
    }

    pub fn wire_type_for<T: Any>(&self) -> Option<&WireType> {
        self.wire_type(TypeId::of::<T>())
    }

    pub fn is_registered<T: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for ArgLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.converters.values().map(|c| c.type_name).collect();
        types.sort_unstable();
        f.debug_struct("ArgLoader").field("types", &types).finish()
    }
}

/// Panic payloads are almost always `&str` or `String`.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
