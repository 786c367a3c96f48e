//! Release gate and ledger diff: decides which owned books to fetch now.

use chrono::{DateTime, Utc};

use crate::library::OwnedRecord;
use crate::state::DownloadLedger;

/// Why an owned book is not downloaded in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Already in the ledger.
    AlreadyDownloaded,
    /// Publish date is after the run's start time.
    NotYetReleased(DateTime<Utc>),
    /// The service sent a publish date that can't be read.
    InvalidPublishDate,
    /// Eligible, but the run was stopped before its turn.
    Interrupted,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::AlreadyDownloaded => write!(f, "already downloaded"),
            SkipReason::NotYetReleased(date) => {
                write!(f, "releases {}", date.format("%Y-%m-%d %H:%M UTC"))
            }
            SkipReason::InvalidPublishDate => write!(f, "unreadable publish date"),
            SkipReason::Interrupted => write!(f, "interrupted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Skip(SkipReason),
}

/// Classify `record` against the release gate and the ledger.
///
/// The release gate runs first: a book whose publish date can't be read is
/// reported as such even if it is already in the ledger.
pub fn evaluate(record: &OwnedRecord, now: DateTime<Utc>, ledger: &DownloadLedger) -> Eligibility {
    let Some(published) = record.published_at() else {
        return Eligibility::Skip(SkipReason::InvalidPublishDate);
    };
    if published > now {
        return Eligibility::Skip(SkipReason::NotYetReleased(published));
    }
    if ledger.contains(&record.id) {
        return Eligibility::Skip(SkipReason::AlreadyDownloaded);
    }
    Eligibility::Eligible
}

/// True iff the book is released as of `now` and not yet downloaded.
#[allow(dead_code)] // Boolean form of `evaluate`; the sync loop needs the skip reason
pub fn is_eligible(record: &OwnedRecord, now: DateTime<Utc>, ledger: &DownloadLedger) -> bool {
    evaluate(record, now, ledger) == Eligibility::Eligible
}
