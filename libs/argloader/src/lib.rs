//! Load raw, dynamically typed argument maps into annotated records.
//!
//! An [`ArgLoader`] maps a Rust type to a converter (raw value → typed value)
//! and to the wire type that type is declared as. A record describes its
//! externally addressable fields through [`ArgRecord`], usually derived:
//! the same descriptors drive both the declared argument schema
//! ([`ArgLoader::args_config`]) and the loading of incoming arguments
//! ([`ArgLoader::load_args`]).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod record;
pub mod registry;
pub mod schema;
pub mod value;
pub mod wire;

pub use argloader_derive::ArgRecord;
pub use error::{ConvertError, ErrorKind, LoadError};
pub use record::{ArgField, ArgRecord};
pub use registry::{ArgLoader, Converter};
pub use schema::{ArgsConfig, ArgumentConfig};
pub use value::RawArgs;
pub use wire::WireType;
