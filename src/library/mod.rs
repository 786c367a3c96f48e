//! Ownership snapshot: the list of books the authenticated account owns,
//! together with their series.

pub mod error;
pub mod types;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;

use crate::auth::endpoints::Endpoints;
use crate::auth::Session;

pub use self::error::LibraryError;
pub use self::types::{LibrarySnapshot, OwnedRecord};

/// Loopback filter that embeds owned books and each book's series in the
/// account details response.
const OWNED_BOOKS_FILTER: &str = r#"{"include":[{"ownedBooks":"serie"}]}"#;

/// Fetch every book the account owns.
///
/// There is no cached or partial fallback: any transport, status or decode
/// problem is returned and ends the run.
pub async fn fetch_owned(
    client: &Client,
    endpoints: &Endpoints,
    session: &Session,
) -> Result<LibrarySnapshot, LibraryError> {
    let url = endpoints.account(session.account_id());
    tracing::debug!("GET {}", url);

    let response = client
        .get(&url)
        .query(&[("filter", OWNED_BOOKS_FILTER)])
        .header(AUTHORIZATION, session.access_token())
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LibraryError::HttpStatus {
            status: status.as_u16(),
        });
    }

    let text = response.text().await?;
    let account: types::AccountResponse = serde_json::from_str(&text)?;
    let mut books = account.owned_books;
    types::sort_books(&mut books);

    tracing::info!(count = books.len(), "Fetched owned books");
    Ok(books)
}
