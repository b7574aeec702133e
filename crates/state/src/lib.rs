//! Session state for dbchat
//!
//! [`ConversationStore`] and [`SchemaCache`] hold what a front end renders;
//! [`ChatSession`] drives them from backend calls.

mod conversation;
mod schema_cache;
mod session;


pub use conversation::ConversationStore;
pub use schema_cache::SchemaCache;
pub use session::ChatSession;
