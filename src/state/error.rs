//! Error types for the download ledger.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or appending to the ledger file.
#[derive(Error, Debug)]
pub enum StateError {
    /// Failed to read an existing ledger file.
    #[error("Failed to read ledger at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to append an entry to the ledger file.
    #[error("Failed to write ledger at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Identifiers are single-line tokens; anything else would corrupt the file.
    #[error("Invalid ledger identifier {0:?}")]
    InvalidId(String),
}
