//! Response bodies returned by the backend API.
//!
//! These mirror what the backend sends; nothing here is validated beyond
//! JSON decoding.

use serde::{Deserialize, Serialize};

use crate::{QueryResult, ReasoningStep, SchemaInfo};

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub llm: String,
}

impl HealthStatus {
    #[must_use]
    pub fn database_connected(&self) -> bool {
        self.database == "connected"
    }
}

/// `POST /query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default)]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<QueryResult>,
    #[serde(default)]
    pub reasoning: Vec<ReasoningStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /schema`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEnvelope {
    #[serde(default)]
    pub schema: Option<SchemaInfo>,
}

/// Acknowledgement body of `POST /schema/refresh` and `POST /history/clear`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default)]
    pub message: String,
}

/// `GET /tables`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableList {
    #[serde(default)]
    pub tables: Vec<String>,
}

/// `POST /connection/test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<u32>,
}

/// `POST /connection/connect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub db_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}
