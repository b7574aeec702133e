//! HTTP gateway to the dbchat backend
//!
//! [`ApiGateway`] wraps every backend endpoint in a single round-trip that
//! resolves to an [`ApiOutcome`]. Failures of any kind are normalized into
//! [`ApiOutcome::Failure`] with a human-readable message; callers never see an
//! `Err`.

#![allow(clippy::same_name_method, reason = "Trait methods mirror inherent gateway methods")]

mod api;
mod config;
pub mod error;
mod gateway;
mod outcome;


pub use api::ChatApi;
pub use config::ClientConfig;
pub use error::ApiError;
pub use gateway::{ApiGateway, Operation};
pub use outcome::ApiOutcome;
