//! Download executor: fetches one owned book into the target directory and,
//! only once the file is complete, records it in the ledger.

pub mod error;
pub mod file;
pub mod paths;

use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::auth::Session;
use crate::library::OwnedRecord;
use crate::service::LibraryService;
use crate::state::DownloadLedger;

pub use self::error::DownloadError;

/// Subset of application config consumed by the executor.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub(crate) directory: PathBuf,
}

impl DownloadConfig {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

#[derive(Debug)]
pub struct DownloadExecutor {
    config: DownloadConfig,
    /// Target paths handed out this run, mapped to the book that owns them.
    claimed: HashMap<PathBuf, String>,
}

impl DownloadExecutor {
    pub fn new(config: DownloadConfig) -> Self {
        Self {
            config,
            claimed: HashMap::new(),
        }
    }

    /// Where `record` is (or would be) stored locally.
    ///
    /// Two books whose names clean to the same file must not overwrite each
    /// other: once a path is claimed by one book, any other book gets the
    /// identifier appended to its file name.
    pub fn target_path(&self, record: &OwnedRecord) -> PathBuf {
        let path = paths::book_path(&self.config.directory, record);
        match self.claimed.get(&path) {
            Some(owner) if *owner != record.id => {
                paths::book_path_with_id(&self.config.directory, record)
            }
            _ => path,
        }
    }

    /// Resolve the target path for `record` and reserve it for the rest of
    /// the run.
    pub fn claim_path(&mut self, record: &OwnedRecord) -> PathBuf {
        let path = self.target_path(record);
        self.claimed
            .entry(path.clone())
            .or_insert_with(|| record.id.clone());
        path
    }

    /// Download one book and record it in the ledger.
    ///
    /// The ledger is touched only after the service reports the file fully
    /// written. Errors are returned to the caller's loop, never propagated
    /// further: one failed book must not block the rest.
    pub async fn download(
        &mut self,
        service: &dyn LibraryService,
        record: &OwnedRecord,
        session: &Session,
        ledger: &mut DownloadLedger,
    ) -> Result<PathBuf, DownloadError> {
        let path = self.claim_path(record);
        tokio::fs::create_dir_all(&self.config.directory).await?;

        tracing::debug!(id = %record.id, path = %path.display(), "downloading");
        let size_bytes = service.download(session, record, &path).await?;

        ledger.record(&record.id).await?;
        tracing::debug!(
            id = %record.id,
            size_bytes,
            "Downloaded {}",
            path.display()
        );
        Ok(path)
    }

    /// Whether the service reports a content update newer than the local copy.
    ///
    /// Only meaningful for books already in the ledger. A missing local file
    /// or an unreadable `updated` timestamp is never treated as an update.
    pub async fn remote_is_newer(&self, record: &OwnedRecord) -> bool {
        let Some(updated) = record.updated_at() else {
            return false;
        };
        let path = self.target_path(record);
        match tokio::fs::metadata(&path).await.and_then(|m| m.modified()) {
            Ok(modified) => updated > DateTime::<Utc>::from(modified),
            Err(_) => false,
        }
    }
}

/// Create a progress bar with a consistent template.
///
/// Returns `ProgressBar::hidden()` when the user passed `--no-progress-bar` or
/// stdout is not a TTY (e.g. piped output, cron jobs).
pub fn create_progress_bar(no_progress_bar: bool, total: u64) -> ProgressBar {
    if no_progress_bar || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}
