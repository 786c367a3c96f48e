//! The remote-library seam the sync orchestrator talks to.
//!
//! [`crate::client::JncClient`] is the HTTP implementation; tests drive the
//! orchestrator through an in-memory fake.

use std::path::Path;

use async_trait::async_trait;

use crate::auth::error::AuthError;
use crate::auth::{Credentials, Session};
use crate::download::DownloadError;
use crate::library::{LibraryError, LibrarySnapshot, OwnedRecord};

#[async_trait]
pub trait LibraryService: Send + Sync {
    /// Authenticate and open a session.
    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Fetch the account's ownership snapshot.
    async fn fetch_owned(&self, session: &Session) -> Result<LibrarySnapshot, LibraryError>;

    /// Transfer one book to `dest`, returning its size in bytes. `Ok` means
    /// the file is complete on disk.
    async fn download(
        &self,
        session: &Session,
        record: &OwnedRecord,
        dest: &Path,
    ) -> Result<u64, DownloadError>;

    /// Invalidate the session. Consumes it so it cannot be released twice.
    async fn logout(&self, session: Session) -> Result<(), AuthError>;
}
