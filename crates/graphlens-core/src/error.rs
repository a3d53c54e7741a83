use thiserror::Error;

/// Top-level error type for GraphLens.
#[derive(Error, Debug)]
pub enum GraphLensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown visualization type: {0}")]
    UnknownVisualization(String),
}

impl From<config::ConfigError> for GraphLensError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
