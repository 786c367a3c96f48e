use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One book the account owns, as listed under `ownedBooks` in the account
/// details response.
///
/// `publish_date` is kept as the raw string sent by the service so that a
/// single malformed value is handled per record by the release filter
/// instead of failing the whole decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwnedRecord {
    pub id: String,
    #[serde(rename = "publishingDate", default, deserialize_with = "nullable_string")]
    pub publish_date: String,
    pub title: String,
    #[serde(rename = "titleslug", default)]
    pub title_slug: Option<String>,
    #[serde(rename = "volumeNumber", default)]
    pub volume_number: Option<f64>,
    #[serde(rename = "serie", default)]
    pub series: Option<Series>,
    /// Last time the service changed the book's content, when reported.
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Series {
    #[serde(rename = "titleslug", default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// The ownership list returned by one fetch.
pub type LibrarySnapshot = Vec<OwnedRecord>;

impl OwnedRecord {
    /// Parsed publish date, or `None` when the service sent something unreadable.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_service_date(&self.publish_date)
    }

    /// Parsed content-update timestamp, if reported and readable.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated.as_deref().and_then(parse_service_date)
    }

    /// Name to save the book under, without extension: the title slug,
    /// falling back to the title and then the id.
    pub fn file_stem(&self) -> &str {
        [self.title_slug.as_deref(), Some(self.title.as_str())]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or(self.id.as_str())
    }

    fn series_slug(&self) -> Option<&str> {
        self.series.as_ref().and_then(|s| s.title_slug.as_deref())
    }
}

/// Response from `GET /users/{id}/` with the owned-books include filter.
#[derive(Debug, Deserialize)]
pub(crate) struct AccountResponse {
    #[serde(rename = "ownedBooks")]
    pub owned_books: Vec<OwnedRecord>,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a timestamp as the service formats it.
///
/// Accepts RFC 3339 (`2020-01-01T00:00:00.000Z`), a naive datetime
/// (`2020-01-01T00:00:00`, taken as UTC) and a bare date (`2020-01-01`,
/// midnight UTC).
pub fn parse_service_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Order books by series, then volume, then title, matching how the service
/// presents a library.
pub(crate) fn sort_books(books: &mut [OwnedRecord]) {
    books.sort_by(|a, b| {
        a.series_slug()
            .cmp(&b.series_slug())
            .then_with(|| {
                a.volume_number
                    .unwrap_or(f64::MAX)
                    .total_cmp(&b.volume_number.unwrap_or(f64::MAX))
            })
            .then_with(|| a.title.cmp(&b.title))
    });
}

#[cfg(test)]
pub(crate) fn record(id: &str, publish_date: &str, title: &str) -> OwnedRecord {
    OwnedRecord {
        id: id.to_string(),
        publish_date: publish_date.to_string(),
        title: title.to_string(),
        title_slug: None,
        volume_number: None,
        series: None,
        updated: None,
    }
}
