use clap::{Args, Parser, Subcommand};

use crate::auth::endpoints::DEFAULT_API_URL;
use crate::types::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "jnc-sync",
    version,
    about = "Download purchased J-Novel Club ebooks that aren't in the local ledger yet"
)]
pub struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Sync flags accepted without the `sync` subcommand
    #[command(flatten)]
    pub sync: SyncArgs,
}

impl Cli {
    /// The subcommand to run; bare invocation means `sync`.
    pub fn effective_command(self) -> Command {
        self.command.unwrap_or(Command::Sync(self.sync))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in, download every released book missing from the ledger, log out
    Sync(SyncArgs),
    /// Show what the ledger holds
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Account email address
    #[arg(short = 'e', long, env = "JNC_LOGIN_EMAIL")]
    pub email: Option<String>,

    /// Account password (if not provided, will prompt).
    /// WARNING: passing via --password is visible in process listings.
    /// Prefer the JNC_LOGIN_PW environment variable instead.
    #[arg(short = 'p', long, env = "JNC_LOGIN_PW", hide_env_values = true)]
    pub password: Option<String>,

    /// Directory the ebooks are saved to
    #[arg(
        short = 'd',
        long,
        env = "JNC_DOWNLOAD_TARGET_DIR",
        default_value = "~/Downloads/"
    )]
    pub directory: String,

    #[command(flatten)]
    pub ledger: LedgerArgs,

    /// Download books again when the service has a newer version than the
    /// local file
    #[arg(long)]
    pub update_books: bool,

    /// Report what would be downloaded without touching disk or ledger
    #[arg(long)]
    pub dry_run: bool,

    /// Disable progress bar
    #[arg(long)]
    pub no_progress_bar: bool,

    /// Base URL of the service API
    #[arg(long, env = "JNC_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,
}

#[derive(Args, Debug, Clone)]
pub struct LedgerArgs {
    /// File listing the identifiers of books already downloaded
    #[arg(
        long = "ledger",
        env = "JNC_DOWNLOADED_BOOKS_FILE",
        default_value = "~/.downloadedJncBooks.txt"
    )]
    pub path: String,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub ledger: LedgerArgs,

    /// Print every recorded identifier
    #[arg(long)]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_bare_invocation_is_sync() {
        let cli = parse(&["jnc-sync", "-e", "reader@example.com", "--dry-run"]);
        match cli.effective_command() {
            Command::Sync(args) => {
                assert_eq!(args.email.as_deref(), Some("reader@example.com"));
                assert!(args.dry_run);
                assert!(!args.update_books);
            }
            other => panic!("expected sync, got {other:?}"),
        }
    }

    #[test]
    fn test_sync_subcommand_flags() {
        let cli = parse(&[
            "jnc-sync",
            "sync",
            "--email",
            "reader@example.com",
            "--directory",
            "/tmp/books",
            "--ledger",
            "/tmp/ledger.txt",
            "--update-books",
            "--timeout",
            "5",
        ]);
        let Command::Sync(args) = cli.effective_command() else {
            panic!("expected sync");
        };
        assert_eq!(args.directory, "/tmp/books");
        assert_eq!(args.ledger.path, "/tmp/ledger.txt");
        assert!(args.update_books);
        assert_eq!(args.timeout, 5);
    }

    #[test]
    fn test_status_subcommand() {
        let cli = parse(&["jnc-sync", "status", "--list", "--ledger", "/tmp/l.txt"]);
        let Command::Status(args) = cli.effective_command() else {
            panic!("expected status");
        };
        assert!(args.list);
        assert_eq!(args.ledger.path, "/tmp/l.txt");
    }

    #[test]
    fn test_log_level_is_global() {
        let cli = parse(&["jnc-sync", "status", "--log-level", "warn"]);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        assert!(Cli::try_parse_from(["jnc-sync", "--timeout", "soon"]).is_err());
    }
}
