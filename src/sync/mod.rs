//! Sync orchestrator: login → fetch snapshot → filter → download loop →
//! logout.
//!
//! Once login succeeds, logout runs on every path out of the run, including
//! a failed library fetch and an interrupted or aborted download loop.

pub mod filter;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::auth::error::AuthError;
use crate::auth::{Credentials, Session};
use crate::download::{create_progress_bar, DownloadExecutor};
use crate::library::{LibraryError, OwnedRecord};
use crate::service::LibraryService;
use crate::shutdown::ShutdownSignals;
use crate::state::DownloadLedger;

use self::filter::{Eligibility, SkipReason};

/// Fatal sync failures. Per-book problems are never errors at this level;
/// they are collected in [`SyncSummary`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Authentication failed: {0}")]
    Authentication(#[source] AuthError),

    #[error("Could not fetch library: {0}")]
    Library(#[source] LibraryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Authenticating,
    Authenticated,
    Syncing,
    LoggingOut,
    Done,
    Failed,
}

/// Run options that shape the orchestrator's behaviour.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub credentials: Credentials,
    /// Fetch books already in the ledger again when the service reports a
    /// content update newer than the local copy.
    pub update_existing_books: bool,
    pub dry_run: bool,
    pub no_progress_bar: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub id: String,
    pub title: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub id: String,
    pub title: String,
    pub error: String,
}

/// Outcome of one run.
#[derive(Debug, Default)]
pub struct SyncSummary {
    pub downloaded: Vec<String>,
    /// Books a dry run would have downloaded.
    pub would_download: Vec<String>,
    pub skipped: Vec<SkippedItem>,
    pub failed: Vec<FailedItem>,
    pub interrupted: bool,
}

impl SyncSummary {
    /// Books owned but not yet released, in snapshot order.
    pub fn upcoming(&self) -> impl Iterator<Item = &SkippedItem> {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::NotYetReleased(_)))
    }

    fn skip(&mut self, record: &OwnedRecord, reason: SkipReason) {
        self.skipped.push(SkippedItem {
            id: record.id.clone(),
            title: record.title.clone(),
            reason,
        });
    }

    /// Write the end-of-run report to the log.
    pub fn log(&self, dry_run: bool) {
        let upcoming: Vec<&SkippedItem> = self.upcoming().collect();
        if !upcoming.is_empty() {
            tracing::info!("── Upcoming releases ──");
            for item in upcoming {
                if let SkipReason::NotYetReleased(date) = item.reason {
                    tracing::info!("  {}  {}", date.format("%Y-%m-%d"), item.title);
                }
            }
        }

        if dry_run {
            tracing::info!("── Dry Run Summary ──");
            tracing::info!("  {} books would be downloaded", self.would_download.len());
            tracing::info!("  {} skipped", self.skipped.len());
            return;
        }

        tracing::info!("── Summary ──");
        tracing::info!(
            "  {} downloaded, {} skipped, {} failed",
            self.downloaded.len(),
            self.skipped.len(),
            self.failed.len()
        );
        for item in &self.failed {
            tracing::warn!("  failed: {} ({}): {}", item.title, item.id, item.error);
        }
        if self.interrupted {
            tracing::warn!("  Interrupted before all books were processed");
        }
    }
}

pub struct SyncOrchestrator<'a> {
    service: &'a dyn LibraryService,
    executor: DownloadExecutor,
    config: SyncConfig,
    shutdown: ShutdownSignals,
    phase: SyncPhase,
}

impl<'a> SyncOrchestrator<'a> {
    pub fn new(
        service: &'a dyn LibraryService,
        executor: DownloadExecutor,
        config: SyncConfig,
        shutdown: ShutdownSignals,
    ) -> Self {
        Self {
            service,
            executor,
            config,
            shutdown,
            phase: SyncPhase::Idle,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Run one sync pass, gating releases against the current time.
    pub async fn run(&mut self, ledger: &mut DownloadLedger) -> Result<SyncSummary, SyncError> {
        self.run_at(ledger, Utc::now()).await
    }

    /// Run one sync pass with `now` as the release-gate reference time.
    pub async fn run_at(
        &mut self,
        ledger: &mut DownloadLedger,
        now: DateTime<Utc>,
    ) -> Result<SyncSummary, SyncError> {
        self.transition(SyncPhase::Authenticating);
        let session = match self.service.login(&self.config.credentials).await {
            Ok(session) => session,
            Err(e) => {
                self.transition(SyncPhase::Failed);
                return Err(SyncError::Authentication(e));
            }
        };
        self.transition(SyncPhase::Authenticated);

        let result = self.sync_session(&session, ledger, now).await;

        self.transition(SyncPhase::LoggingOut);
        if let Err(e) = self.service.logout(session).await {
            tracing::warn!("Logout failed: {}", e);
        }

        match result {
            Ok(summary) => {
                self.transition(SyncPhase::Done);
                Ok(summary)
            }
            Err(e) => {
                self.transition(SyncPhase::Failed);
                Err(e)
            }
        }
    }

    /// Everything that happens while the session is open. Returns instead of
    /// exiting early so the caller can always log out.
    async fn sync_session(
        &mut self,
        session: &Session,
        ledger: &mut DownloadLedger,
        now: DateTime<Utc>,
    ) -> Result<SyncSummary, SyncError> {
        let snapshot = self
            .service
            .fetch_owned(session)
            .await
            .map_err(SyncError::Library)?;

        self.transition(SyncPhase::Syncing);
        let mut summary = SyncSummary::default();
        let mut queue: Vec<OwnedRecord> = Vec::new();

        for record in snapshot {
            let reason = match filter::evaluate(&record, now, ledger) {
                Eligibility::Eligible => {
                    queue.push(record);
                    continue;
                }
                Eligibility::Skip(reason) => reason,
            };
            if reason == SkipReason::AlreadyDownloaded
                && self.config.update_existing_books
                && self.executor.remote_is_newer(&record).await
            {
                tracing::info!(id = %record.id, "{} was updated, downloading again", record.title);
                queue.push(record);
                continue;
            }
            if reason == SkipReason::InvalidPublishDate {
                tracing::warn!(
                    id = %record.id,
                    publish_date = %record.publish_date,
                    "Skipping {}: unreadable publish date",
                    record.title
                );
            }
            summary.skip(&record, reason);
        }

        tracing::info!("{} books to download", queue.len());
        let pb = create_progress_bar(
            self.config.no_progress_bar || self.config.dry_run,
            queue.len() as u64,
        );

        let mut queue = queue.into_iter();
        while let Some(record) = queue.next() {
            if self.shutdown.stop.is_cancelled() {
                pb.suspend(|| tracing::info!("Shutdown requested, stopping new downloads"));
                summary.interrupted = true;
                summary.skip(&record, SkipReason::Interrupted);
                for rest in queue.by_ref() {
                    summary.skip(&rest, SkipReason::Interrupted);
                }
                break;
            }

            if self.config.dry_run {
                tracing::info!(
                    "[DRY RUN] Would download {} to {}",
                    record.title,
                    self.executor.claim_path(&record).display()
                );
                summary.would_download.push(record.id);
                continue;
            }

            pb.set_message(record.title.clone());
            let outcome = tokio::select! {
                result = self.executor.download(self.service, &record, session, ledger) => Some(result),
                _ = self.shutdown.abort.cancelled() => None,
            };
            let Some(outcome) = outcome else {
                pb.suspend(|| tracing::warn!(id = %record.id, "Aborted download of {}", record.title));
                summary.interrupted = true;
                summary.failed.push(FailedItem {
                    id: record.id,
                    title: record.title,
                    error: "aborted by shutdown".to_string(),
                });
                for rest in queue.by_ref() {
                    summary.skip(&rest, SkipReason::Interrupted);
                }
                break;
            };
            match outcome {
                Ok(path) => {
                    pb.suspend(|| tracing::info!("Downloaded {} to {}", record.title, path.display()));
                    summary.downloaded.push(record.id);
                }
                Err(e) => {
                    pb.suspend(|| {
                        if e.is_unavailable() {
                            tracing::warn!(id = %record.id, "{} is not available for download: {}", record.title, e);
                        } else {
                            tracing::error!(id = %record.id, "Download failed: {}: {}", record.title, e);
                        }
                    });
                    summary.failed.push(FailedItem {
                        id: record.id,
                        title: record.title,
                        error: e.to_string(),
                    });
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(summary)
    }

    fn transition(&mut self, next: SyncPhase) {
        tracing::debug!(from = ?self.phase, to = ?next, "sync phase");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::DownloadConfig;
    use crate::library::types::record;
    use crate::service::fake::FakeService;
    use std::path::Path;

    struct Harness {
        dir: tempfile::TempDir,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn ledger_path(&self) -> std::path::PathBuf {
            self.dir.path().join("ledger.txt")
        }

        fn books_dir(&self) -> std::path::PathBuf {
            self.dir.path().join("books")
        }

        async fn ledger(&self) -> DownloadLedger {
            DownloadLedger::open(&self.ledger_path()).await.unwrap()
        }

        fn orchestrator<'a>(
            &self,
            service: &'a FakeService,
            configure: impl FnOnce(&mut SyncConfig),
        ) -> SyncOrchestrator<'a> {
            let mut config = SyncConfig {
                credentials: Credentials::new("reader@example.com", "pw"),
                update_existing_books: false,
                dry_run: false,
                no_progress_bar: true,
            };
            configure(&mut config);
            SyncOrchestrator::new(
                service,
                DownloadExecutor::new(DownloadConfig::new(self.books_dir())),
                config,
                ShutdownSignals::default(),
            )
        }

        fn ledger_text(&self) -> Option<String> {
            std::fs::read_to_string(self.ledger_path()).ok()
        }
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[tokio::test]
    async fn test_released_book_downloaded_and_recorded() {
        let h = Harness::new();
        let service = FakeService::new(vec![record("B1", "2020-01-01", "T1")]);
        let mut ledger = h.ledger().await;

        let mut orch = h.orchestrator(&service, |_| {});
        let summary = orch.run(&mut ledger).await.unwrap();

        assert_eq!(summary.downloaded, vec!["B1".to_string()]);
        assert!(summary.failed.is_empty());
        assert!(ledger.contains("B1"));
        assert_eq!(h.ledger_text().unwrap(), "B1\n");
        assert_eq!(read(&h.books_dir().join("T1.epub")), "epub:B1");
        assert_eq!(service.logout_calls(), 1);
        assert_eq!(orch.phase(), SyncPhase::Done);
    }

    #[tokio::test]
    async fn test_future_release_not_attempted() {
        let h = Harness::new();
        let service = FakeService::new(vec![record("B2", "2999-01-01", "T2")]);
        let mut ledger = h.ledger().await;

        let summary = h
            .orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert!(service.download_calls().is_empty());
        assert!(summary.downloaded.is_empty());
        assert_eq!(summary.upcoming().count(), 1);
        assert!(ledger.is_empty());
        assert!(h.ledger_text().is_none());
    }

    #[tokio::test]
    async fn test_already_downloaded_is_skipped() {
        let h = Harness::new();
        std::fs::write(h.ledger_path(), "B1\n").unwrap();
        let service = FakeService::new(vec![record("B1", "2020-01-01", "T1")]);
        let mut ledger = h.ledger().await;

        let summary = h
            .orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert!(service.download_calls().is_empty());
        assert_eq!(summary.downloaded.len(), 0);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].reason, SkipReason::AlreadyDownloaded);
    }

    #[tokio::test]
    async fn test_login_failure_is_fatal_and_mutates_nothing() {
        let h = Harness::new();
        std::fs::write(h.ledger_path(), "A1\nA2").unwrap();
        let before = std::fs::read(h.ledger_path()).unwrap();
        let service =
            FakeService::new(vec![record("B1", "2020-01-01", "T1")]).rejecting_login();
        let mut ledger = h.ledger().await;

        let mut orch = h.orchestrator(&service, |_| {});
        let err = orch.run(&mut ledger).await.unwrap_err();

        assert!(matches!(err, SyncError::Authentication(_)));
        assert_eq!(orch.phase(), SyncPhase::Failed);
        assert_eq!(service.login_calls(), 1);
        assert_eq!(service.fetch_calls(), 0);
        assert!(service.download_calls().is_empty());
        assert_eq!(service.logout_calls(), 0);
        assert_eq!(std::fs::read(h.ledger_path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_download_not_recorded_and_logout_still_runs() {
        let h = Harness::new();
        let service = FakeService::new(vec![
            record("B3", "2020-01-01", "T3"),
            record("B4", "2020-01-02", "T4"),
        ])
        .failing_download("B3");
        let mut ledger = h.ledger().await;

        let summary = h
            .orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].id, "B3");
        assert_eq!(summary.downloaded, vec!["B4".to_string()]);
        assert!(!ledger.contains("B3"));
        assert_eq!(h.ledger_text().unwrap(), "B4\n");
        assert_eq!(
            service.download_calls(),
            vec!["B3".to_string(), "B4".to_string()]
        );
        assert_eq!(service.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fatal_but_logs_out() {
        let h = Harness::new();
        let service = FakeService::new(vec![]).failing_fetch();
        let mut ledger = h.ledger().await;

        let mut orch = h.orchestrator(&service, |_| {});
        let err = orch.run(&mut ledger).await.unwrap_err();

        assert!(matches!(err, SyncError::Library(LibraryError::Parse(_))));
        assert_eq!(orch.phase(), SyncPhase::Failed);
        assert_eq!(service.logout_calls(), 1);
        assert!(h.ledger_text().is_none());
    }

    #[tokio::test]
    async fn test_logout_failure_is_not_fatal() {
        let h = Harness::new();
        let service =
            FakeService::new(vec![record("B1", "2020-01-01", "T1")]).failing_logout();
        let mut ledger = h.ledger().await;

        let summary = h
            .orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert_eq!(summary.downloaded.len(), 1);
        assert_eq!(service.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let h = Harness::new();
        let service = FakeService::new(vec![
            record("B1", "2020-01-01", "T1"),
            record("B2", "2020-01-01", "T2"),
            record("B9", "2999-01-01", "T9"),
        ]);

        let mut ledger = h.ledger().await;
        h.orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();
        let after_first = std::fs::read(h.ledger_path()).unwrap();
        assert_eq!(service.download_calls().len(), 2);

        let mut ledger = h.ledger().await;
        let summary = h
            .orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert!(summary.downloaded.is_empty());
        assert_eq!(service.download_calls().len(), 2);
        assert_eq!(std::fs::read(h.ledger_path()).unwrap(), after_first);
        assert_eq!(service.logout_calls(), 2);
    }

    #[tokio::test]
    async fn test_ledger_grows_by_exactly_new_downloads() {
        let h = Harness::new();
        std::fs::write(h.ledger_path(), "A1\n").unwrap();
        let service = FakeService::new(vec![
            record("A1", "2020-01-01", "TA"),
            record("B1", "2020-01-01", "T1"),
            record("B2", "2020-01-01", "T2"),
        ]);
        let mut ledger = h.ledger().await;

        h.orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        let text = h.ledger_text().unwrap();
        assert!(text.starts_with("A1\n"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&"B1") && lines.contains(&"B2"));
    }

    #[tokio::test]
    async fn test_invalid_date_skipped_without_aborting() {
        let h = Harness::new();
        let service = FakeService::new(vec![
            record("BAD", "not a date", "Broken"),
            record("B1", "2020-01-01", "T1"),
        ]);
        let mut ledger = h.ledger().await;

        let summary = h
            .orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert_eq!(summary.downloaded, vec!["B1".to_string()]);
        assert_eq!(summary.skipped[0].reason, SkipReason::InvalidPublishDate);
        assert_eq!(service.download_calls(), vec!["B1".to_string()]);
    }

    #[tokio::test]
    async fn test_release_gate_uses_run_start_time() {
        use chrono::TimeZone;
        let h = Harness::new();
        let service = FakeService::new(vec![
            record("B1", "2024-01-01T00:00:00Z", "T1"),
            record("B2", "2024-01-01T00:00:01Z", "T2"),
        ]);
        let mut ledger = h.ledger().await;
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let summary = h
            .orchestrator(&service, |_| {})
            .run_at(&mut ledger, now)
            .await
            .unwrap();

        assert_eq!(summary.downloaded, vec!["B1".to_string()]);
        assert_eq!(service.download_calls(), vec!["B1".to_string()]);
    }

    #[tokio::test]
    async fn test_dry_run_downloads_nothing() {
        let h = Harness::new();
        let service = FakeService::new(vec![record("B1", "2020-01-01", "T1")]);
        let mut ledger = h.ledger().await;

        let summary = h
            .orchestrator(&service, |c| c.dry_run = true)
            .run(&mut ledger)
            .await
            .unwrap();

        assert_eq!(summary.would_download, vec!["B1".to_string()]);
        assert!(summary.downloaded.is_empty());
        assert!(service.download_calls().is_empty());
        assert!(h.ledger_text().is_none());
        assert_eq!(service.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_stops_new_downloads_but_logs_out() {
        let h = Harness::new();
        let service = FakeService::new(vec![
            record("B1", "2020-01-01", "T1"),
            record("B2", "2020-01-01", "T2"),
        ]);
        let mut ledger = h.ledger().await;
        let shutdown = ShutdownSignals::default();
        shutdown.stop.cancel();

        let mut orch = SyncOrchestrator::new(
            &service,
            DownloadExecutor::new(DownloadConfig::new(h.books_dir())),
            SyncConfig {
                credentials: Credentials::new("reader@example.com", "pw"),
                update_existing_books: false,
                dry_run: false,
                no_progress_bar: true,
            },
            shutdown,
        );
        let summary = orch.run(&mut ledger).await.unwrap();

        assert!(summary.interrupted);
        assert!(service.download_calls().is_empty());
        assert_eq!(summary.skipped.len(), 2);
        assert!(summary
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::Interrupted));
        assert_eq!(service.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_existing_books_refetches_newer_content() {
        let h = Harness::new();
        std::fs::write(h.ledger_path(), "B1\nB2\n").unwrap();
        std::fs::create_dir_all(h.books_dir()).unwrap();
        std::fs::write(h.books_dir().join("T1.epub"), "old").unwrap();
        std::fs::write(h.books_dir().join("T2.epub"), "old").unwrap();

        let mut updated = record("B1", "2020-01-01", "T1");
        updated.updated = Some("2999-01-01T00:00:00Z".into());
        let mut unchanged = record("B2", "2020-01-01", "T2");
        unchanged.updated = Some("2000-01-01T00:00:00Z".into());
        let service = FakeService::new(vec![updated, unchanged]);
        let mut ledger = h.ledger().await;

        let summary = h
            .orchestrator(&service, |c| c.update_existing_books = true)
            .run(&mut ledger)
            .await
            .unwrap();

        assert_eq!(service.download_calls(), vec!["B1".to_string()]);
        assert_eq!(summary.downloaded, vec!["B1".to_string()]);
        assert_eq!(read(&h.books_dir().join("T1.epub")), "epub:B1");
        assert_eq!(h.ledger_text().unwrap(), "B1\nB2\n");
    }

    #[tokio::test]
    async fn test_updated_books_ignored_without_flag() {
        let h = Harness::new();
        std::fs::write(h.ledger_path(), "B1\n").unwrap();
        let mut updated = record("B1", "2020-01-01", "T1");
        updated.updated = Some("2999-01-01T00:00:00Z".into());
        let service = FakeService::new(vec![updated]);
        let mut ledger = h.ledger().await;

        h.orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert!(service.download_calls().is_empty());
    }

    #[tokio::test]
    async fn test_books_with_colliding_names_keep_separate_files() {
        let h = Harness::new();
        let service = FakeService::new(vec![
            record("B1", "2020-01-01", "Same?"),
            record("B2", "2020-01-01", "Same"),
        ]);
        let mut ledger = h.ledger().await;

        let summary = h
            .orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert_eq!(summary.downloaded, vec!["B1".to_string(), "B2".to_string()]);
        assert_eq!(read(&h.books_dir().join("Same.epub")), "epub:B1");
        assert_eq!(read(&h.books_dir().join("Same-B2.epub")), "epub:B2");
    }

    #[tokio::test]
    async fn test_ledger_write_failure_counts_as_failed() {
        let h = Harness::new();
        let blocker = h.dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut ledger = DownloadLedger::from_ids(blocker.join("ledger.txt"), &[]);
        let service = FakeService::new(vec![record("B1", "2020-01-01", "T1")]);

        let summary = h
            .orchestrator(&service, |_| {})
            .run(&mut ledger)
            .await
            .unwrap();

        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].id, "B1");
        assert!(summary.downloaded.is_empty());
        assert!(!ledger.contains("B1"));
        // The transfer itself completed
        assert_eq!(read(&h.books_dir().join("T1.epub")), "epub:B1");
        assert_eq!(service.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_abort_drops_inflight_download_and_logs_out() {
        let h = Harness::new();
        let service = FakeService::new(vec![
            record("B1", "2020-01-01", "T1"),
            record("B2", "2020-01-01", "T2"),
        ])
        .stalling_download("B1");
        let mut ledger = h.ledger().await;
        let shutdown = ShutdownSignals::default();
        let abort = shutdown.abort.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            abort.cancel();
        });

        let mut orch = SyncOrchestrator::new(
            &service,
            DownloadExecutor::new(DownloadConfig::new(h.books_dir())),
            SyncConfig {
                credentials: Credentials::new("reader@example.com", "pw"),
                update_existing_books: false,
                dry_run: false,
                no_progress_bar: true,
            },
            shutdown,
        );
        let summary = orch.run(&mut ledger).await.unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].id, "B1");
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].id, "B2");
        assert_eq!(summary.skipped[0].reason, SkipReason::Interrupted);
        assert_eq!(service.download_calls(), vec!["B1".to_string()]);
        assert!(!ledger.contains("B1"));
        assert_eq!(service.logout_calls(), 1);
        assert_eq!(orch.phase(), SyncPhase::Done);
    }
}
