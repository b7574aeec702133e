//! Plain-text rendering for the interactive chat.

use std::fmt::Write as _;

use dbchat_core::{Message, QueryHistoryItem, QueryResult, TableInfo};

/// Rows beyond this are summarized instead of printed.
const MAX_RENDERED_ROWS: usize = 20;
/// Cells wider than this are cut.
const MAX_CELL_WIDTH: usize = 40;

pub(crate) fn render_message(message: &Message) -> String {
    let mut out = String::new();
    let error = message.error.as_deref().unwrap_or_default();
    if !message.is_error() || error != message.content {
        let _ = writeln!(out, "{}", message.content);
    }
    if message.is_error() {
        let _ = writeln!(out, "error: {error}");
    }
    if let Some(sql) = &message.sql {
        let _ = writeln!(out, "\n  {}", sql.trim());
    }
    if let Some(results) = &message.results {
        out.push('\n');
        out.push_str(&render_result(results));
    }
    out
}

pub(crate) fn render_result(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return format!("({} rows)\n", result.count);
    }

    let shown: Vec<Vec<String>> = result
        .rows
        .iter()
        .take(MAX_RENDERED_ROWS)
        .map(|row| {
            result.columns.iter().map(|c| row.get(c).map_or_else(String::new, cell_text)).collect()
        })
        .collect();

    let widths: Vec<usize> = result
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            shown
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, result.columns.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &shown {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    if result.rows.len() > shown.len() {
        let _ = writeln!(out, "... {} more rows", result.rows.len() - shown.len());
    }
    let _ = writeln!(out, "({} rows)", result.count);
    out
}

pub(crate) fn render_table(table: &TableInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} rows)", table.name, table.row_count);
    if let Some(description) = &table.description {
        let _ = writeln!(out, "  {description}");
    }
    let keys: Vec<&str> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
    if !keys.is_empty() {
        let _ = writeln!(out, "  primary key: {}", keys.join(", "));
    }
    for column in &table.columns {
        let mut flags = Vec::new();
        if column.primary_key {
            flags.push("pk".to_owned());
        }
        if !column.nullable {
            flags.push("not null".to_owned());
        }
        if let Some(target) = &column.foreign_key {
            flags.push(format!("-> {target}"));
        }
        let _ = writeln!(out, "  {} {} {}", column.name, column.data_type, flags.join(", "));
    }
    out
}

pub(crate) fn render_history(items: &[QueryHistoryItem]) -> String {
    let mut out = String::new();
    for item in items {
        let mark = if item.success { "ok" } else { "failed" };
        let _ = writeln!(out, "[{}] {} ({mark})", item.timestamp.format("%H:%M:%S"), item.question);
        if !item.sql.is_empty() {
            let _ = writeln!(out, "    {}", item.sql.trim());
        }
    }
    out
}

fn cell_text(value: &serde_json::Value) -> String {
    let text = match value {
        serde_json::Value::Null => "NULL".to_owned(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.chars().count() > MAX_CELL_WIDTH {
        let cut: String = text.chars().take(MAX_CELL_WIDTH.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text
    }
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> =
        cells.zip(widths.iter().copied()).map(|(cell, width)| format!("{cell:<width$}")).collect();
    let _ = writeln!(out, "{}", line.join(" | ").trim_end());
}
