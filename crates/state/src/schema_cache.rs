//! Last-fetched schema snapshot and the table the user is looking at.

use chrono::{DateTime, Utc};
use dbchat_core::{SchemaInfo, TableInfo, TableRelationship};

#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    schema: Option<SchemaInfo>,
    is_loading: bool,
    last_updated: Option<DateTime<Utc>>,
    /// Looked up by name on every access; the snapshot behind it can be
    /// replaced at any time.
    selected_table: Option<String>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot wholesale and stamps `last_updated`.
    pub fn set_schema(&mut self, schema: SchemaInfo) {
        self.schema = Some(schema);
        self.last_updated = Some(Utc::now());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// No existence check: the name may not resolve in the current snapshot.
    pub fn select_table(&mut self, table_name: Option<&str>) {
        self.selected_table = table_name.map(str::to_owned);
    }

    /// Resets the snapshot, its timestamp and the selection together.
    pub fn clear_schema(&mut self) {
        self.schema = None;
        self.last_updated = None;
        self.selected_table = None;
    }

    #[must_use]
    pub const fn schema(&self) -> Option<&SchemaInfo> {
        self.schema.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    #[must_use]
    pub fn selected_table(&self) -> Option<&str> {
        self.selected_table.as_deref()
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.schema.as_ref().map_or(0, |s| s.tables.len())
    }

    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.schema.as_ref().map_or(0, |s| s.relationships.len())
    }

    #[must_use]
    pub fn table(&self, table_name: &str) -> Option<&TableInfo> {
        self.schema.as_ref()?.table(table_name)
    }

    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        self.schema
            .as_ref()
            .map(|s| s.tables.iter().map(|t| t.name.as_str()).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn is_schema_loaded(&self) -> bool {
        self.schema.is_some()
    }

    /// Resolves the selection against the current snapshot.
    #[must_use]
    pub fn selected_table_info(&self) -> Option<&TableInfo> {
        self.table(self.selected_table.as_deref()?)
    }

    /// Foreign-key edges in or out of `table_name`.
    #[must_use]
    pub fn relationships_for(&self, table_name: &str) -> Vec<&TableRelationship> {
        self.schema
            .as_ref()
            .map(|s| s.relationships.iter().filter(|r| r.touches(table_name)).collect())
            .unwrap_or_default()
    }
}
