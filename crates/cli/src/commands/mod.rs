use anyhow::Result;
use dbchat_client::{ApiGateway, ApiOutcome};
use serde::Serialize;

pub(crate) mod connection;
pub(crate) mod query;
pub(crate) mod schema;

/// Prints the payload as pretty JSON, or turns the failure into an error.
pub(crate) fn print_outcome<T: Serialize>(outcome: ApiOutcome<T>) -> Result<()> {
    match outcome {
        ApiOutcome::Success { data } => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        },
        ApiOutcome::Failure { error } => Err(anyhow::anyhow!(error)),
    }
}

pub(crate) async fn run_health(gateway: &ApiGateway) -> Result<()> {
    print_outcome(gateway.check_health().await)
}

pub(crate) async fn run_clear_history(gateway: &ApiGateway) -> Result<()> {
    print_outcome(gateway.clear_history().await)
}
