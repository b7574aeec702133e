//! Chat messages and the query results attached to them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a query result, keyed by column name.
pub type Row = BTreeMap<String, serde_json::Value>;

/// Tabular output of an executed SQL statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
    pub count: usize,
}

impl QueryResult {
    /// Whether `count` agrees with the number of rows actually returned.
    ///
    /// The backend produces `count`; nothing on this side enforces it.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.count == self.rows.len()
    }
}

/// One action/observation/thought triple from the agent's trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningStep {
    pub step: u32,
    pub action: String,
    pub observation: String,
    pub thought: String,
}

/// A stored chat message. Immutable once appended to a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<QueryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Vec<ReasoningStep>>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Message {
    /// Stamps a [`NewMessage`] with its identity.
    #[must_use]
    pub fn from_new(new: NewMessage, id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            role: new.role,
            content: new.content,
            sql: new.sql,
            results: new.results,
            reasoning: new.reasoning,
            timestamp,
            error: new.error,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Everything a caller provides for a message; id and timestamp are assigned
/// by the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub role: Role,
    pub content: String,
    pub sql: Option<String>,
    pub results: Option<QueryResult>,
    pub reasoning: Option<Vec<ReasoningStep>>,
    pub error: Option<String>,
}

impl NewMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sql: None,
            results: None,
            reasoning: None,
            error: None,
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    #[must_use]
    pub fn sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    #[must_use]
    pub fn results(mut self, results: QueryResult) -> Self {
        self.results = Some(results);
        self
    }

    #[must_use]
    pub fn reasoning(mut self, steps: Vec<ReasoningStep>) -> Self {
        self.reasoning = Some(steps);
        self
    }

    #[must_use]
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_result_deserializes_backend_shape() {
        let json = r#"{
            "columns": ["id", "name"],
            "rows": [{"id": 1, "name": "alice"}, {"id": 2, "name": null}],
            "count": 2
        }"#;
        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.columns, vec!["id", "name"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0]["name"], serde_json::json!("alice"));
        assert!(result.rows[1]["name"].is_null());
        assert!(result.is_consistent());
    }

    #[test]
    fn query_result_with_mismatched_count_is_flagged() {
        let result = QueryResult { columns: vec!["n".to_owned()], rows: Vec::new(), count: 3 };
        assert!(!result.is_consistent());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn message_omits_absent_optional_fields() {
        let msg = Message::from_new(NewMessage::user("hi"), "m1".to_owned(), Utc::now());
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "user");
        assert!(value.get("sql").is_none());
        assert!(value.get("error").is_none());
        assert!(!msg.is_error());
    }

    #[test]
    fn builder_sets_optional_fields() {
        let new = NewMessage::assistant("3 rows")
            .sql("SELECT 1")
            .reasoning(vec![ReasoningStep {
                step: 1,
                action: "analyze_schema".to_owned(),
                observation: "Found 2 tables in database".to_owned(),
                thought: "look at users".to_owned(),
            }])
            .error("boom");
        assert_eq!(new.role, Role::Assistant);
        assert_eq!(new.sql.as_deref(), Some("SELECT 1"));
        assert_eq!(new.reasoning.as_ref().map(Vec::len), Some(1));
        assert_eq!(new.error.as_deref(), Some("boom"));
    }
}
