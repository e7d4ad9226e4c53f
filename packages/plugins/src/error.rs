use thiserror::Error;

/// Errors raised by plugins during validation and generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("Property {property} not set for plugin {plugin}")]
    MissingProperty { plugin: String, property: String },

    #[error("Plugin {plugin} is misconfigured: {message}")]
    Config { plugin: String, message: String },

    #[error("{plugin} requires the generic-interface plugin to be declared and validated before it")]
    Dependency { plugin: String },

    #[error("Table '{table}' has no recorded {missing} type for the generic interface")]
    Binding { table: String, missing: &'static str },

    #[error("Unknown plugin type: {0}")]
    UnknownPlugin(String),

    #[error("Invalid plugin invocation order: {0}")]
    InvocationOrder(String),
}

impl PluginError {
    /// Fatal errors abort the whole run; the rest only disable one plugin
    /// or skip one table.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PluginError::InvocationOrder(_) | PluginError::UnknownPlugin(_)
        )
    }
}

pub type PluginResult<T> = Result<T, PluginError>;
