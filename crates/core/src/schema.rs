//! Database schema snapshot as reported by the backend.

use serde::{Deserialize, Serialize};

/// A single column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    /// `table.column` this column references, when it is a foreign key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    pub row_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TableInfo {
    /// Columns flagged as part of the primary key, in declaration order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }
}

/// Directed foreign-key edge between two tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRelationship {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

impl TableRelationship {
    /// Whether `table` is either endpoint of this edge.
    #[must_use]
    pub fn touches(&self, table: &str) -> bool {
        self.from_table == table || self.to_table == table
    }
}

/// Full schema snapshot. Always replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaInfo {
    #[serde(default)]
    pub tables: Vec<TableInfo>,
    #[serde(default)]
    pub relationships: Vec<TableRelationship>,
    #[serde(default)]
    pub summary: String,
}

impl SchemaInfo {
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_uses_type_on_the_wire() {
        let json = r#"{"name":"user_id","type":"integer","nullable":false,"primary_key":false,"foreign_key":"users.id"}"#;
        let column: Column = serde_json::from_str(json).unwrap();
        assert_eq!(column.data_type, "integer");
        assert_eq!(column.foreign_key.as_deref(), Some("users.id"));

        let back = serde_json::to_value(&column).unwrap();
        assert_eq!(back["type"], "integer");
        assert!(back.get("data_type").is_none());
    }

    #[test]
    fn schema_tolerates_missing_collections() {
        let schema: SchemaInfo = serde_json::from_str(r#"{"summary":"empty"}"#).unwrap();
        assert!(schema.tables.is_empty());
        assert!(schema.relationships.is_empty());
        assert_eq!(schema.summary, "empty");
    }

    #[test]
    fn relationship_touches_both_endpoints() {
        let rel = TableRelationship {
            from_table: "orders".to_owned(),
            from_column: "user_id".to_owned(),
            to_table: "users".to_owned(),
            to_column: "id".to_owned(),
        };
        assert!(rel.touches("orders"));
        assert!(rel.touches("users"));
        assert!(!rel.touches("products"));
    }
}
