use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BilinkError>;

#[derive(Debug, Error)]
pub enum BilinkError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid reference pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl BilinkError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
