use std::time::Duration;

use dbchat_core::constants::{API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, TIMEOUT_ENV};
use dbchat_core::env_config::{env_parse_with_default, env_string_with_default};

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` waits for the backend indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE.to_owned(), timeout: None }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: normalize_base_url(&base_url.into()), timeout: None }
    }

    /// Reads `DBCHAT_API_BASE` and `DBCHAT_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env_string_with_default(API_BASE_ENV, DEFAULT_API_BASE);
        Self { base_url: normalize_base_url(&base_url), timeout: timeout_from_env() }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Zero seconds means no timeout.
fn timeout_from_env() -> Option<Duration> {
    let secs = env_parse_with_default(TIMEOUT_ENV, DEFAULT_TIMEOUT_SECS);
    (secs > 0).then_some(Duration::from_secs(secs))
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ClientConfig::new("http://localhost:8080/api//");
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().base_url, "http://localhost:8080/api");
    }

    #[test]
    fn timeout_env_parses_seconds_and_zero_disables() {
        unsafe { std::env::set_var(TIMEOUT_ENV, "15") };
        assert_eq!(timeout_from_env(), Some(Duration::from_secs(15)));
        unsafe { std::env::set_var(TIMEOUT_ENV, "0") };
        assert_eq!(timeout_from_env(), None);
        unsafe { std::env::set_var(TIMEOUT_ENV, "soon") };
        assert_eq!(timeout_from_env(), None);
        unsafe { std::env::remove_var(TIMEOUT_ENV) };
        assert_eq!(timeout_from_env(), None);
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::default()
            .with_base_url("https://chat.example.com/api/")
            .with_timeout(Some(Duration::from_secs(5)));
        assert_eq!(config.base_url, "https://chat.example.com/api");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
