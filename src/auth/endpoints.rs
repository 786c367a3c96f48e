//! URL builders for the J-Novel Club REST API.
//!
//! The base URL is configurable so the client can be pointed at a mock
//! server; every other path is fixed by the service.

pub const DEFAULT_API_URL: &str = "https://api.j-novel.club/api";

#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Build endpoints rooted at `base`. A trailing slash is ignored.
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let base = base.trim().trim_end_matches('/');
        if base.is_empty() {
            anyhow::bail!("API base URL must not be empty");
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!("API base URL '{}' must start with http:// or https://", base);
        }
        Ok(Self {
            base: base.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn login(&self) -> String {
        format!("{}/users/login?include=user", self.base)
    }

    pub fn logout(&self) -> String {
        format!("{}/users/logout", self.base)
    }

    /// Account details for `account_id`; owned books are requested via the
    /// `filter` query parameter.
    pub fn account(&self, account_id: &str) -> String {
        format!("{}/users/{}/", self.base, account_id)
    }

    pub fn premium_ebook(&self, book_id: &str) -> String {
        format!("{}/volumes/{}/getpremiumebook", self.base, book_id)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: DEFAULT_API_URL.to_string(),
        }
    }
}
