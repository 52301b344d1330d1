use thiserror::Error;

/// Errors raised at the plugin boundary.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Engine failure: configuration defect or aggregate rejection.
    #[error(transparent)]
    Core(#[from] envvet_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A define override rejected a value.
    #[error("define override failed for {key:?}: {message}")]
    Define { key: String, message: String },
    /// The config loader itself failed, as opposed to missing a source.
    #[error("config loader error: {0}")]
    Loader(String),
}

/// Result type for plugin-boundary operations.
pub type PluginResult<T> = std::result::Result<T, PluginError>;
