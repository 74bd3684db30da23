use std::path::PathBuf;

/// Errors raised while loading a [`ViewConfig`](crate::ViewConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for a view config.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but makes no sense.
    #[error("Invalid config value for `{field}`: {message}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
