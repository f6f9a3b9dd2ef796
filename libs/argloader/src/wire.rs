use std::fmt;

/// Argument type as declared to the external schema.
///
/// Serialized as the bare type name, e.g. `"Int"` or a custom scalar name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireType {
    Boolean,
    String,
    Int,
    Float,
    Id,
    /// Custom scalar or enum registered from outside the core.
    Named(String),
}

impl WireType {
    pub fn named(name: impl Into<String>) -> Self {
        WireType::Named(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            WireType::Boolean => "Boolean",
            WireType::String => "String",
            WireType::Int => "Int",
            WireType::Float => "Float",
            WireType::Id => "ID",
            WireType::Named(name) => name,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for WireType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
