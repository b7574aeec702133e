use thiserror::Error;

/// Reasons a set of connection credentials is rejected before it is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("database name is required")]
    MissingDatabase,

    #[error("host is required for {0} connections")]
    MissingHost(&'static str),

    #[error("port must be between 1 and 65535 for {0} connections")]
    InvalidPort(&'static str),

    #[error("file path is required for sqlite3 connections")]
    MissingPath,

    #[error("unsupported database type: {0}")]
    UnsupportedType(String),
}
