//! Database connection credentials sent to `/connection/*`.
//!
//! The backend accepts one flat JSON object discriminated by `type`. On this
//! side each supported database is its own variant so a request can only be
//! built with the fields that database actually needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CredentialError;

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseKind {
    #[serde(rename = "postgres")]
    Postgres,
    #[serde(rename = "mysql")]
    Mysql,
    #[serde(rename = "sqlite3")]
    Sqlite,
}

impl DatabaseKind {
    /// Wire name expected by the backend.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite3",
        }
    }

    /// Port the engine listens on out of the box, if it is networked.
    #[must_use]
    pub const fn default_port(&self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::Mysql => Some(3306),
            Self::Sqlite => None,
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseKind {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::Mysql),
            "sqlite3" | "sqlite" => Ok(Self::Sqlite),
            other => Err(CredentialError::UnsupportedType(other.to_owned())),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConnectionCredentials {
    #[serde(rename = "postgres")]
    Postgres {
        host: String,
        port: u16,
        database: String,
        user: String,
        password: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sslmode: Option<String>,
    },
    #[serde(rename = "mysql")]
    Mysql { host: String, port: u16, database: String, user: String, password: String },
    #[serde(rename = "sqlite3")]
    Sqlite { database: String, path: String },
}

impl ConnectionCredentials {
    #[must_use]
    pub const fn kind(&self) -> DatabaseKind {
        match self {
            Self::Postgres { .. } => DatabaseKind::Postgres,
            Self::Mysql { .. } => DatabaseKind::Mysql,
            Self::Sqlite { .. } => DatabaseKind::Sqlite,
        }
    }

    #[must_use]
    pub fn database(&self) -> &str {
        match self {
            Self::Postgres { database, .. }
            | Self::Mysql { database, .. }
            | Self::Sqlite { database, .. } => database,
        }
    }

    /// Checks the fields the backend needs to open a connection.
    ///
    /// # Errors
    /// Returns the first missing or out-of-range field.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.database().trim().is_empty() {
            return Err(CredentialError::MissingDatabase);
        }
        match self {
            Self::Postgres { host, port, .. } | Self::Mysql { host, port, .. } => {
                let kind = self.kind().as_str();
                if host.trim().is_empty() {
                    return Err(CredentialError::MissingHost(kind));
                }
                if *port == 0 {
                    return Err(CredentialError::InvalidPort(kind));
                }
                Ok(())
            },
            Self::Sqlite { path, .. } => {
                if path.trim().is_empty() {
                    return Err(CredentialError::MissingPath);
                }
                Ok(())
            },
        }
    }

    /// Password-free description of the connection target, safe for logs.
    #[must_use]
    pub fn target(&self) -> String {
        match self {
            Self::Postgres { host, port, database, user, .. } => {
                format!("postgres://{user}@{host}:{port}/{database}")
            },
            Self::Mysql { host, port, database, user, .. } => {
                format!("mysql://{user}@{host}:{port}/{database}")
            },
            Self::Sqlite { path, .. } => format!("sqlite3:{path}"),
        }
    }
}

impl fmt::Debug for ConnectionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres { host, port, database, user, sslmode, .. } => f
                .debug_struct("Postgres")
                .field("host", host)
                .field("port", port)
                .field("database", database)
                .field("user", user)
                .field("password", &"***")
                .field("sslmode", sslmode)
                .finish(),
            Self::Mysql { host, port, database, user, .. } => f
                .debug_struct("Mysql")
                .field("host", host)
                .field("port", port)
                .field("database", database)
                .field("user", user)
                .field("password", &"***")
                .finish(),
            Self::Sqlite { database, path } => {
                f.debug_struct("Sqlite").field("database", database).field("path", path).finish()
            },
        }
    }
}
