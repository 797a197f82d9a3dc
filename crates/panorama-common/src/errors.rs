use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the shared key-value medium.
///
/// Every variant is transient from the registry's point of view: the
/// current tick is skipped and the next tick tries again.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store quota exceeded writing {key}")]
    QuotaExceeded { key: String },

    #[error("store io error: {0}")]
    Io(String),

    #[error("store encoding error: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PanoramaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

}
