//! Persistent sync state.
//!
//! The only state carried across runs is the download ledger: the set of
//! book identifiers that have already been fetched successfully. It is the
//! sole mechanism for cross-run idempotence and is never reconciled against
//! the remote service or the files on disk.

pub mod error;
pub mod ledger;

pub use error::StateError;
pub use ledger::DownloadLedger;
