use thiserror::Error;

use crate::state::StateError;

/// Per-item download failures. None of these abort a sync run; the item is
/// reported as failed and left out of the ledger.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error {status} downloading {id}")]
    HttpStatus { status: u16, id: String },

    #[error("HTTP error downloading {path} (bytes_so_far={bytes_written}): {source}")]
    Http {
        source: reqwest::Error,
        path: String,
        bytes_written: u64,
    },

    #[error("Disk error: {0}")]
    Disk(#[from] std::io::Error),

    #[error("Downloaded but not recorded: {0}")]
    Ledger(#[from] StateError),
}

impl DownloadError {
    /// Whether the service refused the book rather than the transfer failing.
    ///
    /// The service answers books that are not downloadable yet with a
    /// redirect to an error page, or with 404.
    pub fn is_unavailable(&self) -> bool {
        match self {
            DownloadError::HttpStatus { status, .. } => {
                (300..400).contains(status) || *status == 404
            }
            DownloadError::Http { .. } | DownloadError::Disk(_) | DownloadError::Ledger(_) => {
                false
            }
        }
    }
}
