use std::fmt;

/// Error kind, one per stage that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Registration or descriptor mistakes. Permanent, abort startup.
    Config,
    /// Argument schema could not be derived.
    Schema,
    /// Raw arguments could not be loaded into a record.
    Populate,
}

/// Outcome of a failed converter call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The converter returned `Err`.
    #[error("{0}")]
    Rejected(String),

    /// The converter panicked; the panic was caught at the registry boundary.
    #[error("{converter} panicked: {message}")]
    Panicked { converter: String, message: String },

    /// The converted value did not match the field it was written into.
    #[error("converted value is not a {expected}")]
    Mismatch { expected: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(
        "a converter has already been registered for the {type_name} type. cannot also register {converter}"
    )]
    DuplicateConverter {
        type_name: &'static str,
        converter: &'static str,
    },

    #[error("{value} is not a valid 'required' tag value (field {field})")]
    InvalidRequiredTag { field: &'static str, value: String },

    #[error("raw arguments must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("argument '{arg}' is declared by more than one field")]
    DuplicateArgument { arg: &'static str },

    #[error("{arg} is required")]
    MissingRequired { arg: &'static str },

    #[error("no converter registered for type {type_name}")]
    NoConverter { type_name: &'static str },

    #[error("cannot populate {field}: {source}")]
    Convert {
        field: &'static str,
        #[source]
        source: ConvertError,
    },

    /// Wraps another error with a context prefix.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<LoadError>,
    },
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::DuplicateConverter { .. }
            | LoadError::InvalidRequiredTag { .. }
            | LoadError::NotAnObject(_) => ErrorKind::Config,
            LoadError::DuplicateArgument { .. } => ErrorKind::Schema,
            LoadError::MissingRequired { .. }
            | LoadError::NoConverter { .. }
            | LoadError::Convert { .. } => ErrorKind::Populate,
            LoadError::Context { source, .. } => source.kind(),
        }
    }

    /// Add context to the error, preserving the original kind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        LoadError::Context {
            context: ctx.to_string(),
            source: Box::new(self),
        }
    }

    /// Strip any context layers.
    pub fn root(&self) -> &LoadError {
        match self {
            LoadError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}
