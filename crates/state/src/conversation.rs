//! Chat transcript and bounded query history.

use chrono::Utc;
use dbchat_core::constants::{MAX_HISTORY_ITEMS, RECENT_HISTORY_LEN};
use dbchat_core::{Message, NewHistoryItem, NewMessage, QueryHistoryItem};
use uuid::Uuid;

/// Messages in insertion order plus a newest-first history log.
///
/// Every operation is a total in-memory mutation.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    query_history: Vec<QueryHistoryItem>,
    is_loading: bool,
    current_query: String,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps the message with a fresh id and the current time and appends it.
    pub fn add_message(&mut self, message: NewMessage) -> &Message {
        let idx = self.messages.len();
        self.messages.push(Message::from_new(message, Uuid::new_v4().to_string(), Utc::now()));
        &self.messages[idx]
    }

    /// Inserts at the front; the oldest entries beyond capacity are dropped.
    pub fn add_to_history(&mut self, item: NewHistoryItem) -> &QueryHistoryItem {
        self.query_history
            .insert(0, QueryHistoryItem::from_new(item, Uuid::new_v4().to_string(), Utc::now()));
        self.query_history.truncate(MAX_HISTORY_ITEMS);
        &self.query_history[0]
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    pub fn clear_history(&mut self) {
        self.query_history.clear();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_current_query(&mut self, query: impl Into<String>) {
        self.current_query = query.into();
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Newest first.
    #[must_use]
    pub fn query_history(&self) -> &[QueryHistoryItem] {
        &self.query_history
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// The most recent history entries, newest first.
    #[must_use]
    pub fn recent_history(&self) -> &[QueryHistoryItem] {
        &self.query_history[..self.query_history.len().min(RECENT_HISTORY_LEN)]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use dbchat_core::Role;

    fn history(question: &str) -> NewHistoryItem {
        NewHistoryItem::new(question, format!("-- {question}"), true)
    }

    #[test]
    fn messages_keep_call_order_and_unique_ids() {
        let mut store = ConversationStore::new();
        for i in 0..25 {
            let msg = if i % 2 == 0 {
                NewMessage::user(format!("m{i}"))
            } else {
                NewMessage::assistant(format!("m{i}"))
            };
            store.add_message(msg);
        }

        assert_eq!(store.message_count(), 25);
        let contents: Vec<_> = store.messages().iter().map(|m| m.content.clone()).collect();
        let expected: Vec<_> = (0..25).map(|i| format!("m{i}")).collect();
        assert_eq!(contents, expected);

        let ids: HashSet<_> = store.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), 25);
        assert_eq!(store.messages()[1].role, Role::Assistant);
    }

    #[test]
    fn add_message_returns_stored_copy() {
        let mut store = ConversationStore::new();
        let id = store.add_message(NewMessage::user("hello").sql("SELECT 1")).id.clone();
        let last = store.last_message().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.sql.as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn history_is_newest_first() {
        let mut store = ConversationStore::new();
        store.add_to_history(history("first"));
        store.add_to_history(history("second"));
        assert_eq!(store.query_history()[0].question, "second");
        assert_eq!(store.query_history()[1].question, "first");
    }

    #[test]
    fn history_evicts_oldest_past_capacity() {
        let mut store = ConversationStore::new();
        for i in 0..=50 {
            store.add_to_history(history(&format!("q{i}")));
            assert!(store.query_history().len() <= MAX_HISTORY_ITEMS);
            assert_eq!(store.query_history()[0].question, format!("q{i}"));
        }

        let questions: Vec<_> = store.query_history().iter().map(|h| h.question.clone()).collect();
        let expected: Vec<_> = (1..=50).rev().map(|i| format!("q{i}")).collect();
        assert_eq!(questions, expected);
        assert!(!questions.contains(&"q0".to_owned()));
    }

    #[test]
    fn recent_history_caps_at_ten() {
        let mut store = ConversationStore::new();
        for i in 0..3 {
            store.add_to_history(history(&format!("q{i}")));
        }
        assert_eq!(store.recent_history().len(), 3);

        for i in 3..30 {
            store.add_to_history(history(&format!("q{i}")));
        }
        let recent = store.recent_history();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].question, "q29");
        assert_eq!(recent[9].question, "q20");
    }

    #[test]
    fn clear_messages_resets_views_but_keeps_history() {
        let mut store = ConversationStore::new();
        store.add_message(NewMessage::user("hi"));
        store.add_to_history(history("hi"));

        store.clear_messages();
        assert!(store.last_message().is_none());
        assert_eq!(store.message_count(), 0);
        assert!(store.messages().is_empty());
        assert_eq!(store.query_history().len(), 1);

        store.clear_history();
        assert!(store.query_history().is_empty());
        assert!(store.recent_history().is_empty());
    }

    #[test]
    fn clear_history_keeps_messages() {
        let mut store = ConversationStore::new();
        store.add_message(NewMessage::user("hi"));
        store.add_to_history(history("hi"));
        store.clear_history();
        assert_eq!(store.message_count(), 1);
    }

    #[test]
    fn flags_are_plain_overwrites() {
        let mut store = ConversationStore::new();
        assert!(!store.is_loading());
        assert_eq!(store.current_query(), "");

        store.set_loading(true);
        store.set_current_query("top customers");
        assert!(store.is_loading());
        assert_eq!(store.current_query(), "top customers");

        store.set_loading(false);
        store.set_current_query("");
        assert!(!store.is_loading());
        assert_eq!(store.current_query(), "");
        assert_eq!(store.message_count(), 0);
    }
}
