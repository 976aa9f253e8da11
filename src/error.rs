use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds surfaced by the storage layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A source file or class data file that should exist does not.
    #[error("not found: {0}")]
    NotFound(PathBuf),

    /// The operating system refused a read, write, copy, or directory creation.
    #[error("io failure on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file exists but does not hold valid JSON.
    #[error("invalid JSON in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A class name was registered a second time.
    #[error("class already registered: {0}")]
    AlreadyRegistered(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// True for the missing-file kind, regardless of which path was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
