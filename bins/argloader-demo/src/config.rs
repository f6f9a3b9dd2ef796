use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::error::DemoError;

#[derive(Parser)]
#[command(name = "argloader-demo", about = "Resolve a `hello` field from raw arguments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the declared argument schema of every field as JSON
    Schema,
    /// Resolve a field from a request
    Resolve(ResolveArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ResolveArgs {
    /// Path to a TOML request file
    #[arg(long, env = "ARGLOADER_REQUEST", conflicts_with = "args")]
    pub request: Option<String>,

    /// Inline JSON object of arguments, e.g. '{"name": "Joe"}'
    #[arg(long)]
    pub args: Option<String>,

    /// Field to resolve (overrides the request file)
    #[arg(long)]
    pub field: Option<String>,
}

// ---- TOML request ----

#[derive(Debug, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_field")]
    pub field: String,
    #[serde(default)]
    pub args: toml::Table,
}

fn default_field() -> String {
    "hello".to_string()
}

impl RequestConfig {
    pub fn load(path: &str) -> Result<Self, DemoError> {
        let content = std::fs::read_to_string(path).map_err(|e| DemoError::Config {
            context: "read",
            detail: format!("'{path}': {e}"),
        })?;
        Self::parse(&content).map_err(|e| match e {
            DemoError::Config { context, detail } => DemoError::Config {
                context,
                detail: format!("'{path}': {detail}"),
            },
            other => other,
        })
    }

    pub fn parse(toml_str: &str) -> Result<Self, DemoError> {
        toml::from_str(toml_str).map_err(|e| DemoError::Config {
            context: "parse",
            detail: e.to_string(),
        })
    }

    /// Arguments as format-independent raw values.
    pub fn raw_args(&self) -> Result<argloader::RawArgs, DemoError> {
        let value = serde_json::to_value(&self.args).map_err(|e| DemoError::Config {
            context: "args",
            detail: e.to_string(),
        })?;
        Ok(argloader::value::raw_args_from(value)?)
    }
}
