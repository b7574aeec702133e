//! Typed error enum for the gateway.

use dbchat_core::CredentialError;
use thiserror::Error;

/// Everything that can go wrong during one backend round-trip.
///
/// Never handed to callers directly: the gateway folds it into
/// [`crate::ApiOutcome::Failure`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP status {code}")]
    Status { code: u16, message: Option<String> },
    #[error("JSON parse error in {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid credentials: {0}")]
    InvalidCredentials(#[from] CredentialError),
    #[error("invalid table name {0:?}")]
    InvalidTableName(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl ApiError {
    /// Human-readable message carried by the failure, if it has one.
    ///
    /// Status errors carry the backend's `error` text when the body had one;
    /// undecodable bodies carry nothing.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Transport(e) => Some(e.to_string()),
            Self::Status { message, .. } => message.clone(),
            Self::Decode { .. } => None,
            Self::InvalidCredentials(e) => Some(e.to_string()),
            Self::InvalidTableName(_) | Self::ClientInit(_) => Some(self.to_string()),
        }
    }

    /// Extracts `error` (or `message`) from a JSON error body.
    pub(crate) fn status(code: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|v| {
            ["error", "message"]
                .iter()
                .filter_map(|key| v.get(key).and_then(serde_json::Value::as_str))
                .map(str::trim)
                .find(|s| !s.is_empty())
                .map(str::to_owned)
        });
        Self::Status { code, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_prefers_error_field() {
        let err = ApiError::status(400, r#"{"success":false,"error":"Database not connected."}"#);
        assert_eq!(err.message().as_deref(), Some("Database not connected."));
    }

    #[test]
    fn status_falls_back_to_message_field() {
        let err = ApiError::status(500, r#"{"message":"boom"}"#);
        assert_eq!(err.message().as_deref(), Some("boom"));
    }

    #[test]
    fn status_without_usable_body_has_no_message() {
        assert_eq!(ApiError::status(500, "Internal Server Error").message(), None);
        assert_eq!(ApiError::status(500, "").message(), None);
        assert_eq!(ApiError::status(500, r#"{"error":"  "}"#).message(), None);
        assert_eq!(ApiError::status(500, r#"{"error":42}"#).message(), None);
    }

    #[test]
    fn credential_errors_keep_their_text() {
        let err = ApiError::from(CredentialError::MissingPath);
        assert_eq!(err.message().as_deref(), Some("file path is required for sqlite3 connections"));
    }
}
