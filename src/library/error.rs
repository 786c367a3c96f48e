use thiserror::Error;

/// Errors fetching the ownership snapshot. All are fatal for a sync run.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Network error fetching library: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Library request failed with HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Could not decode library response: {0}")]
    Parse(#[from] serde_json::Error),
}
