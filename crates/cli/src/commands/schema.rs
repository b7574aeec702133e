use anyhow::Result;
use dbchat_client::{ApiGateway, ApiOutcome};

use super::print_outcome;

pub(crate) async fn run_schema(gateway: &ApiGateway, refresh: bool) -> Result<()> {
    if refresh {
        if let ApiOutcome::Failure { error } = gateway.refresh_schema().await {
            return Err(anyhow::anyhow!(error));
        }
    }
    match gateway.get_schema().await {
        ApiOutcome::Success { data } => match data.schema {
            Some(schema) => {
                println!("{}", serde_json::to_string_pretty(&schema)?);
                Ok(())
            },
            None => Err(anyhow::anyhow!("backend returned no schema")),
        },
        ApiOutcome::Failure { error } => Err(anyhow::anyhow!(error)),
    }
}

pub(crate) async fn run_tables(gateway: &ApiGateway) -> Result<()> {
    print_outcome(gateway.get_tables().await.map(|list| list.tables))
}

pub(crate) async fn run_table(gateway: &ApiGateway, name: &str) -> Result<()> {
    print_outcome(gateway.get_table_info(name).await)
}
