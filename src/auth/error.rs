use thiserror::Error;

/// Errors raised while establishing or tearing down a session.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login failed: {0}")]
    FailedLogin(String),

    #[error("Unexpected login response: {0}")]
    InvalidResponse(String),

    #[error("API error (HTTP {code}): {message}")]
    ApiError { code: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
