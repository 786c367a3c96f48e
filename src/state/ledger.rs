//! Append-only ledger of downloaded book identifiers.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::error::StateError;

/// Set of identifiers that have already been downloaded, backed by a
/// newline-delimited text file.
///
/// Entries are appended and synced to disk one at a time, so a crash mid-run
/// keeps every success recorded before it. The file is never rewritten.
#[derive(Debug)]
pub struct DownloadLedger {
    path: PathBuf,
    ids: HashSet<String>,
    /// The file exists and its last line lacks a trailing newline
    /// (hand-edited); the next append must start a fresh line.
    needs_separator: bool,
}

impl DownloadLedger {
    /// Load the ledger at `path`. A missing file is an empty ledger; it is
    /// not created until the first entry is recorded.
    pub async fn open(path: &Path) -> Result<Self, StateError> {
        let path = path.to_path_buf();
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No ledger at {}, starting empty", path.display());
                return Ok(Self {
                    path,
                    ids: HashSet::new(),
                    needs_separator: false,
                });
            }
            Err(source) => return Err(StateError::Read { path, source }),
        };

        let ids: HashSet<String> = contents.lines().filter_map(parse_line).collect();
        let needs_separator = !contents.is_empty() && !contents.ends_with('\n');
        tracing::debug!(
            entries = ids.len(),
            "Loaded ledger from {}",
            path.display()
        );

        Ok(Self {
            path,
            ids,
            needs_separator,
        })
    }

    /// Build a ledger without reading `path` (for testing).
    #[cfg(test)]
    pub fn from_ids(path: impl Into<PathBuf>, ids: &[&str]) -> Self {
        Self {
            path: path.into(),
            ids: ids.iter().map(|id| id.to_string()).collect(),
            needs_separator: false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Append `id` and persist it before returning.
    ///
    /// Returns `Ok(false)` without touching the file when `id` is already
    /// present, so the file never holds duplicates.
    pub async fn record(&mut self, id: &str) -> Result<bool, StateError> {
        if id.trim().is_empty() || id.contains(['\n', '\r', '\t']) || id != id.trim() {
            return Err(StateError::InvalidId(id.to_string()));
        }
        if self.ids.contains(id) {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| self.write_error(source))?;
            }
        }

        let mut line = String::with_capacity(id.len() + 2);
        if self.needs_separator {
            line.push('\n');
        }
        line.push_str(id);
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|source| self.write_error(source))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| self.write_error(source))?;
        file.flush().await.map_err(|source| self.write_error(source))?;
        file.sync_data()
            .await
            .map_err(|source| self.write_error(source))?;

        self.needs_separator = false;
        self.ids.insert(id.to_string());
        tracing::debug!(id, "Recorded download in ledger");
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All recorded identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> StateError {
        StateError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Extract the identifier from one ledger line.
///
/// Older ledgers hold tab-separated `id\ttitle\tdate` rows; only
/// the first column is the identifier.
fn parse_line(line: &str) -> Option<String> {
    let id = line.split('\t').next().unwrap_or("").trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
