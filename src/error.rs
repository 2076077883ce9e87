// Error taxonomy for the task store

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the task store
///
/// `Validation` means the request was rejected before the file was touched.
/// `Io`, `Malformed` and `IdsExhausted` are storage failures: the operation
/// is aborted and the file is left as it was.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {path} at line {line}: {reason}")]
    Malformed { path: PathBuf, line: usize, reason: String },

    #[error("no task ids left in {path}: highest id is {max_id}")]
    IdsExhausted { path: PathBuf, max_id: u64 },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the caller supplied bad input, as opposed to a storage failure
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
