use std::path::Path;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::error::DownloadError;
use super::paths;
use crate::auth::endpoints::Endpoints;
use crate::auth::Session;

/// Download one premium ebook to `download_path`, returning the byte count.
///
/// The body is streamed into a `.part` file that is renamed into place only
/// after the whole body has been written and flushed, so `download_path`
/// never holds a truncated book. A transfer that dies mid-body leaves the
/// `.part` file behind; the next attempt truncates it.
///
/// `client` must not follow redirects: the service answers books that are
/// not downloadable with a redirect to an error page that itself returns 200.
pub async fn download_file(
    client: &Client,
    endpoints: &Endpoints,
    session: &Session,
    book_id: &str,
    download_path: &Path,
) -> Result<u64, DownloadError> {
    let path_str = download_path.display().to_string();
    let url = endpoints.premium_ebook(book_id);
    tracing::debug!("GET {}", url);

    let response = client
        .get(&url)
        .query(&[
            ("userId", session.account_id()),
            ("userName", session.account_name()),
            ("access_token", session.access_token()),
        ])
        .send()
        .await
        .map_err(|e| DownloadError::Http {
            source: e,
            path: path_str.clone(),
            bytes_written: 0,
        })?;

    if response.status() != StatusCode::OK {
        return Err(DownloadError::HttpStatus {
            status: response.status().as_u16(),
            id: book_id.to_string(),
        });
    }

    let part_path = paths::part_path(download_path);
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&part_path)
        .await?;

    let mut bytes_written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| DownloadError::Http {
            source: e,
            path: path_str.clone(),
            bytes_written,
        })?;
        file.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&part_path, download_path).await?;

    Ok(bytes_written)
}
