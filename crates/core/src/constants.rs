//! Shared constants for dbchat.

/// Capacity of the query history log. Older entries are evicted past this.
pub const MAX_HISTORY_ITEMS: usize = 50;

/// Number of history entries returned by the "recent history" view.
pub const RECENT_HISTORY_LEN: usize = 10;

/// Backend base URL used when `DBCHAT_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Environment variable holding the backend base URL.
pub const API_BASE_ENV: &str = "DBCHAT_API_BASE";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DBCHAT_TIMEOUT_SECS";

/// Request timeout when `DBCHAT_TIMEOUT_SECS` is unset. Zero disables it.
pub const DEFAULT_TIMEOUT_SECS: u64 = 0;

/// Default `sslmode` the backend applies to Postgres connections.
pub const DEFAULT_PG_SSLMODE: &str = "disable";
