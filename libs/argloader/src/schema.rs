use std::collections::BTreeMap;

use crate::error::LoadError;
use crate::record::ArgRecord;
use crate::registry::ArgLoader;
use crate::wire::WireType;

/// Declared configuration of a single argument.
///
/// `wire_type` is `None` when the field's type has no registered converter;
/// the schema consumer decides what to do with that.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ArgumentConfig {
    #[serde(rename = "type")]
    pub wire_type: Option<WireType>,
    pub description: String,
}

/// Argument name → declared configuration.
pub type ArgsConfig = BTreeMap<String, ArgumentConfig>;

impl ArgLoader {
    /// Argument schema of `R`.
    ///
    /// # Panics
    ///
    /// Panics if the schema cannot be derived. Meant for setup code that
    /// treats a misconfigured record as a programming error.
    pub fn args_config<R: ArgRecord>(&self) -> ArgsConfig {
        match self.safe_args_config::<R>() {
            Ok(config) => config,
            Err(e) => panic!("could not configure arguments: {e}"),
        }
    }

    /// Argument schema of `R`, one entry per annotated field.
    ///
    /// Two fields exposed under the same argument name fail with
    /// `DuplicateArgument`: the schema can only declare one. `load_args` does
    /// not check this and writes the shared value into every such field.
    pub fn safe_args_config<R: ArgRecord>(&self) -> Result<ArgsConfig, LoadError> {
        let mut out = ArgsConfig::new();
        for field in R::arg_fields() {
            let wire_type = self.wire_type(field.type_id()).cloned();
            if wire_type.is_none() {
                tracing::warn!(
                    record = std::any::type_name::<R>(),
                    arg = field.arg(),
                    ty = field.type_name(),
                    "no wire type registered for argument type"
                );
            }
            let config = ArgumentConfig {
                wire_type,
                description: field.description().to_string(),
            };
            if out.insert(field.arg().to_string(), config).is_some() {
                return Err(LoadError::DuplicateArgument { arg: field.arg() });
            }
        }
        Ok(out)
    }
}
