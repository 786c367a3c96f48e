//! HTTP implementation of [`LibraryService`] for the J-Novel Club API.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::auth::endpoints::Endpoints;
use crate::auth::error::AuthError;
use crate::auth::{self, Credentials, Session};
use crate::download::{self, DownloadError};
use crate::library::{self, LibraryError, LibrarySnapshot, OwnedRecord};
use crate::service::LibraryService;

const DEFAULT_USER_AGENT: &str = concat!("jnc-sync/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every call of a run.
///
/// Redirects are disabled: the download endpoint signals an unavailable book
/// by redirecting to an error page that returns 200, which must not be
/// mistaken for the book itself.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Result<Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

    Client::builder()
        .default_headers(default_headers)
        .redirect(Policy::none())
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

#[derive(Debug, Clone)]
pub struct JncClient {
    client: Client,
    endpoints: Endpoints,
}

impl JncClient {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl LibraryService for JncClient {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        auth::login(&self.client, &self.endpoints, credentials).await
    }

    async fn fetch_owned(&self, session: &Session) -> Result<LibrarySnapshot, LibraryError> {
        library::fetch_owned(&self.client, &self.endpoints, session).await
    }

    async fn download(
        &self,
        session: &Session,
        record: &OwnedRecord,
        dest: &Path,
    ) -> Result<u64, DownloadError> {
        download::file::download_file(&self.client, &self.endpoints, session, &record.id, dest)
            .await
    }

    async fn logout(&self, session: Session) -> Result<(), AuthError> {
        auth::logout(&self.client, &self.endpoints, session).await
    }
}
