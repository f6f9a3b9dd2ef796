use std::any::{Any, TypeId};
use std::fmt;

use crate::error::{ConvertError, LoadError};

type AssignFn<R> = Box<dyn Fn(&mut R, Box<dyn Any>) -> Result<(), ConvertError> + Send + Sync>;

/// A record whose fields can be loaded from raw arguments.
///
/// Usually implemented with `#[derive(ArgRecord)]`:
///
/// ```ignore
/// #[derive(ArgRecord, Default)]
/// pub struct HelloArgs {
///     #[arg(name = "name", required = "true", desc = "Your name")]
///     pub name: String,
///
///     #[arg(name = "greeting", desc = "How to say hello")]
///     pub greeting: String,
/// }
/// ```
pub trait ArgRecord: 'static {
    /// Descriptors of every externally addressable field, in declaration order.
    ///
    /// Fields not listed here are never read or written by the loader.
    fn arg_fields() -> Vec<ArgField<Self>>
    where
        Self: Sized;
}

/// Declaration of a single externally addressable field of `R`.
pub struct ArgField<R> {
    field: &'static str,
    arg: &'static str,
    required: Option<&'static str>,
    description: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    assign: AssignFn<R>,
}

impl<R: 'static> ArgField<R> {
    /// Field `field` of type `V`, exposed as argument `arg`, written by `set`.
    pub fn new<V: Any>(field: &'static str, arg: &'static str, set: fn(&mut R, V)) -> Self {
        let assign = move |record: &mut R, value: Box<dyn Any>| -> Result<(), ConvertError> {
            let value = value.downcast::<V>().map_err(|_| ConvertError::Mismatch {
                expected: std::any::type_name::<V>(),
            })?;
            set(record, *value);
            Ok(())
        };
        Self {
            field,
            arg,
            required: None,
            description: "",
            type_id: TypeId::of::<V>(),
            type_name: std::any::type_name::<V>(),
            assign: Box::new(assign),
        }
    }

    /// Textual `required` tag, parsed when the argument turns out to be absent.
    pub fn with_required(mut self, tag: &'static str) -> Self {
        self.required = Some(tag);
        self
    }

    pub fn with_description(mut self, text: &'static str) -> Self {
        self.description = text;
        self
    }
}

impl<R> ArgField<R> {
    /// Rust field name.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Argument name the field is exposed as.
    pub fn arg(&self) -> &'static str {
        self.arg
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn required_tag(&self) -> Option<&'static str> {
        self.required
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether a missing argument is an error. No tag means optional.
    pub fn is_required(&self) -> Result<bool, LoadError> {
        match self.required {
            None => Ok(false),
            Some(tag) => parse_bool_tag(tag).ok_or_else(|| LoadError::InvalidRequiredTag {
                field: self.field,
                value: tag.to_string(),
            }),
        }
    }

    /// Write a converted value into the field.
    pub fn assign(&self, record: &mut R, value: Box<dyn Any>) -> Result<(), ConvertError> {
        (self.assign)(record, value)
    }
}

impl<R> fmt::Debug for ArgField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgField")
            .field("field", &self.field)
            .field("arg", &self.arg)
            .field("required", &self.required)
            .field("description", &self.description)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Boolean literals accepted in a `required` tag.
pub fn parse_bool_tag(tag: &str) -> Option<bool> {
    match tag {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
