use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record of one past question and the SQL it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHistoryItem {
    pub id: String,
    pub question: String,
    pub sql: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

impl QueryHistoryItem {
    #[must_use]
    pub fn from_new(new: NewHistoryItem, id: String, timestamp: DateTime<Utc>) -> Self {
        Self { id, question: new.question, sql: new.sql, timestamp, success: new.success }
    }
}

/// Caller-supplied part of a history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryItem {
    pub question: String,
    pub sql: String,
    pub success: bool,
}

impl NewHistoryItem {
    #[must_use]
    pub fn new(question: impl Into<String>, sql: impl Into<String>, success: bool) -> Self {
        Self { question: question.into(), sql: sql.into(), success }
    }
}
