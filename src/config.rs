use std::path::PathBuf;

use crate::auth::endpoints::Endpoints;
use crate::cli::SyncArgs;

/// Resolved settings for one sync run.
pub struct Config {
    pub email: String,
    pub password: Option<String>,
    pub directory: PathBuf,
    pub ledger_path: PathBuf,
    pub endpoints: Endpoints,
    pub timeout_secs: u64,
    pub update_books: bool,
    pub dry_run: bool,
    pub no_progress_bar: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("directory", &self.directory)
            .field("ledger_path", &self.ledger_path)
            .field("api_url", &self.endpoints.base())
            .field("update_books", &self.update_books)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn from_args(args: SyncArgs) -> anyhow::Result<Self> {
        let email = args
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("An account email is required (--email or JNC_LOGIN_EMAIL)")
            })?;

        if args.timeout == 0 {
            anyhow::bail!("--timeout must be at least 1 second");
        }

        let endpoints = Endpoints::new(&args.api_url)?;

        Ok(Self {
            email,
            password: args.password.filter(|p| !p.is_empty()),
            directory: expand_tilde(&args.directory),
            ledger_path: expand_tilde(&args.ledger.path),
            endpoints,
            timeout_secs: args.timeout,
            update_books: args.update_books,
            dry_run: args.dry_run,
            no_progress_bar: args.no_progress_bar,
        })
    }
}
