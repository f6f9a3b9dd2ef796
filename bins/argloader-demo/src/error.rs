#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("no request given (use --request or --args)")]
    NoRequest,

    #[error("field '{0}' not found")]
    FieldNotFound(String),

    #[error("{0}")]
    Load(#[from] argloader::LoadError),

    #[error("output: {0}")]
    Output(#[from] serde_json::Error),
}
