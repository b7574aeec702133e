//! Core types for dbchat
//!
//! This crate contains the data model shared by the client, the session state
//! and the CLI: chat messages, query results, schema snapshots and connection
//! credentials.

pub mod constants;
pub mod env_config;
mod credentials;
mod error;
mod history;
mod message;
mod responses;
mod schema;

pub use credentials::*;
pub use error::*;
pub use history::*;
pub use message::*;
pub use responses::*;
pub use schema::*;
