//! Fixed values shared across the crate.

use std::time::Duration;

/// Base URL of the hackathon events API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hackthenorth.com/v3";

/// Demo-only login. Not a security boundary.
pub const DEMO_USERNAME: &str = "hacker";
pub const DEMO_PASSWORD: &str = "htn2026";

/// How long a fetched event list is served from cache.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Quiet period before a search query is applied.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Key of the persisted auth document, used as the session file stem.
pub const SESSION_KEY: &str = "htn_auth";
