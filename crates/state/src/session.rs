//! Wires the backend gateway to the conversation and schema stores.

use dbchat_client::{ApiOutcome, ChatApi};
use dbchat_core::{
    ConnectResult, ConnectionCredentials, ConnectionTestResult, Message, NewHistoryItem,
    NewMessage, QueryResponse,
};

use crate::conversation::ConversationStore;
use crate::schema_cache::SchemaCache;

/// One user's chat context: a backend plus the state it feeds.
///
/// Nothing here is global. Front ends own a session and pass it by reference.
#[derive(Debug)]
pub struct ChatSession<A> {
    api: A,
    conversation: ConversationStore,
    schema: SchemaCache,
}

impl<A: ChatApi> ChatSession<A> {
    pub fn new(api: A) -> Self {
        Self { api, conversation: ConversationStore::new(), schema: SchemaCache::new() }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn conversation(&self) -> &ConversationStore {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut ConversationStore {
        &mut self.conversation
    }

    pub const fn schema(&self) -> &SchemaCache {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut SchemaCache {
        &mut self.schema
    }

    /// Sends a question and records both sides of the exchange.
    ///
    /// Always appends one user message, one assistant message and one history
    /// entry; backend failures are recorded on the assistant message.
    pub async fn ask(&mut self, question: &str) -> &Message {
        self.conversation.set_current_query(question);
        self.conversation.set_loading(true);
        self.conversation.add_message(NewMessage::user(question));

        let outcome = self.api.send_query(question).await;
        let (reply, history) = match outcome {
            ApiOutcome::Success { data } => answer_from_response(question, data),
            ApiOutcome::Failure { error } => (
                NewMessage::assistant(error.clone()).error(error),
                NewHistoryItem::new(question, "", false),
            ),
        };

        if reply.error.is_some() {
            tracing::warn!(question, error = reply.error.as_deref(), "question failed");
        } else {
            tracing::debug!(question, sql = reply.sql.as_deref(), "question answered");
        }

        self.conversation.add_to_history(history);
        self.conversation.set_loading(false);
        self.conversation.add_message(reply)
    }

    /// Fetches the schema snapshot into the cache.
    ///
    /// A response without a schema leaves the cache untouched.
    pub async fn load_schema(&mut self) -> ApiOutcome<()> {
        self.schema.set_loading(true);
        let outcome = self.api.get_schema().await;
        self.schema.set_loading(false);

        outcome.map(|envelope| match envelope.schema {
            Some(schema) => {
                tracing::debug!(tables = schema.tables.len(), "schema loaded");
                self.schema.set_schema(schema);
            },
            None => {
                tracing::warn!("backend returned no schema");
            },
        })
    }

    /// Asks the backend to re-introspect, then reloads the snapshot.
    pub async fn refresh_schema(&mut self) -> ApiOutcome<()> {
        self.schema.set_loading(true);
        let refreshed = self.api.refresh_schema().await;
        if let ApiOutcome::Failure { error } = refreshed {
            self.schema.set_loading(false);
            return ApiOutcome::Failure { error };
        }
        self.load_schema().await
    }

    /// Clears the backend's conversation memory and, on success, the local
    /// transcript and history.
    pub async fn clear_history(&mut self) -> ApiOutcome<()> {
        let outcome = self.api.clear_history().await;
        if outcome.is_success() {
            self.conversation.clear_messages();
            self.conversation.clear_history();
        }
        outcome.map(|_| ())
    }

    pub async fn test_connection(
        &self,
        credentials: &ConnectionCredentials,
    ) -> ApiOutcome<ConnectionTestResult> {
        self.api.test_connection(credentials).await
    }

    /// Points the backend at another database.
    ///
    /// On success the old schema and transcript no longer apply: both are
    /// dropped and the new schema is loaded. A failed schema load does not
    /// turn a successful connect into a failure.
    pub async fn connect(&mut self, credentials: &ConnectionCredentials) -> ApiOutcome<ConnectResult> {
        let outcome = self.api.connect(credentials).await;
        if let ApiOutcome::Success { data } = &outcome
            && data.success
        {
            tracing::info!(db = %credentials.target(), "connected to database");
            self.schema.clear_schema();
            self.conversation.clear_messages();
            if let ApiOutcome::Failure { error } = self.load_schema().await {
                tracing::warn!(%error, "schema load after connect failed");
            }
        }
        outcome
    }
}

fn answer_from_response(question: &str, resp: QueryResponse) -> (NewMessage, NewHistoryItem) {
    if let Some(results) = &resp.results
        && !results.is_consistent()
    {
        tracing::warn!(
            count = results.count,
            rows = results.rows.len(),
            "query result count does not match returned rows"
        );
    }

    let history = NewHistoryItem::new(question, resp.sql.clone().unwrap_or_default(), resp.success);
    let content = if resp.answer.is_empty() && !resp.success {
        resp.error.clone().unwrap_or_default()
    } else {
        resp.answer
    };

    let mut reply = NewMessage::assistant(content);
    reply.sql = resp.sql;
    reply.results = resp.results;
    if !resp.reasoning.is_empty() {
        reply.reasoning = Some(resp.reasoning);
    }
    if !resp.success {
        reply.error = Some(resp.error.unwrap_or_else(|| "Query failed".to_owned()));
    }
    (reply, history)
}
