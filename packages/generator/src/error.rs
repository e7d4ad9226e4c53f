use mapgen_introspect::IntrospectError;
use mapgen_plugins::PluginError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Table metadata error: {0}")]
    Introspect(#[from] IntrospectError),

    #[error("Invalid plugin invocation order: {0}")]
    InvocationOrder(String),

    #[error("Unknown plugin type: {0}")]
    UnknownPlugin(String),

    #[error("Plugin error: {0}")]
    Plugin(PluginError),

    #[error("No tables to generate")]
    NoTables,
}

impl From<PluginError> for GeneratorError {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::InvocationOrder(message) => GeneratorError::InvocationOrder(message),
            PluginError::UnknownPlugin(name) => GeneratorError::UnknownPlugin(name),
            other => GeneratorError::Plugin(other),
        }
    }
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
