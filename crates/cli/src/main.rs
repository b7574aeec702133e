use anyhow::Result;
use clap::{Parser, Subcommand};
use dbchat_client::{ApiGateway, ClientConfig};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::connection::CredentialArgs;

#[derive(Parser)]
#[command(name = "dbchat")]
#[command(about = "Ask questions about your database in plain language", long_about = None)]
struct Cli {
    /// Backend base URL (overrides DBCHAT_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check backend, database and LLM status
    Health,
    /// Ask a single question and print the answer as JSON
    Ask { question: String },
    /// Print the database schema
    Schema {
        /// Re-introspect the database before fetching
        #[arg(long)]
        refresh: bool,
    },
    /// List table names
    Tables,
    /// Show columns of one table
    Table { name: String },
    /// Check that the backend can reach a database
    TestConnection {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Point the backend at a database
    Connect {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Forget the backend's conversation memory
    ClearHistory,
    /// Interactive chat session
    Chat,
}

fn build_gateway(api_base: Option<String>) -> Result<ApiGateway> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = api_base {
        config = config.with_base_url(url);
    }
    tracing::debug!(base_url = %config.base_url, "using backend");
    Ok(ApiGateway::new(&config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let gateway = build_gateway(cli.api_base)?;

    match cli.command {
        Commands::Health => commands::run_health(&gateway).await,
        Commands::Ask { question } => commands::query::run_ask(&gateway, &question).await,
        Commands::Schema { refresh } => commands::schema::run_schema(&gateway, refresh).await,
        Commands::Tables => commands::schema::run_tables(&gateway).await,
        Commands::Table { name } => commands::schema::run_table(&gateway, &name).await,
        Commands::TestConnection { credentials } => {
            commands::connection::run_test(&gateway, credentials).await
        },
        Commands::Connect { credentials } => {
            commands::connection::run_connect(&gateway, credentials).await
        },
        Commands::ClearHistory => commands::run_clear_history(&gateway).await,
        Commands::Chat => commands::query::run_chat(gateway).await,
    }
}
