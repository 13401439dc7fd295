//! Failures shared by every flag store backend.

use std::{error::Error as StdError, fmt};

use thiserror::Error;

/// Result alias for flag store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Settings row operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Reading the row.
    Read,
    /// Writing one flag.
    Write,
    /// Health probe.
    Probe,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreOperation::Read => "read",
            StoreOperation::Write => "write",
            StoreOperation::Probe => "probe",
        })
    }
}

/// The backend holding the settings row could not serve a request.
#[derive(Debug, Error)]
#[error("flag store failed to {operation} the settings row")]
pub struct StorageError {
    /// What was attempted.
    pub operation: StoreOperation,
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl StorageError {
    /// Wrap a backend failure of `operation`.
    pub fn new(operation: StoreOperation, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            operation,
            source: Box::new(source),
        }
    }
}
