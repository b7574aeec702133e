use anyhow::Result;
use clap::Args;
use dbchat_client::ApiGateway;
use dbchat_core::constants::DEFAULT_PG_SSLMODE;
use dbchat_core::{ConnectionCredentials, DatabaseKind};

use super::print_outcome;

/// Environment variable read when `--password` is not given.
const PASSWORD_ENV: &str = "DBCHAT_DB_PASSWORD";

#[derive(Args, Debug, Clone)]
pub(crate) struct CredentialArgs {
    /// postgres, mysql or sqlite3
    #[arg(long = "type", value_name = "TYPE")]
    pub db_type: DatabaseKind,
    #[arg(long)]
    pub database: String,
    #[arg(long)]
    pub host: Option<String>,
    /// Defaults to the engine's standard port
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long)]
    pub user: Option<String>,
    /// Falls back to DBCHAT_DB_PASSWORD
    #[arg(long)]
    pub password: Option<String>,
    /// Postgres only
    #[arg(long)]
    pub sslmode: Option<String>,
    /// Database file, sqlite3 only
    #[arg(long)]
    pub path: Option<String>,
}

impl CredentialArgs {
    pub(crate) fn into_credentials(self) -> ConnectionCredentials {
        let password = self.password.or_else(|| std::env::var(PASSWORD_ENV).ok()).unwrap_or_default();
        let port = self.port.or_else(|| self.db_type.default_port()).unwrap_or(0);
        let host = self.host.unwrap_or_else(|| "localhost".to_owned());
        let user = self.user.unwrap_or_default();
        match self.db_type {
            DatabaseKind::Postgres => ConnectionCredentials::Postgres {
                host,
                port,
                database: self.database,
                user,
                password,
                sslmode: Some(self.sslmode.unwrap_or_else(|| DEFAULT_PG_SSLMODE.to_owned())),
            },
            DatabaseKind::Mysql => ConnectionCredentials::Mysql {
                host,
                port,
                database: self.database,
                user,
                password,
            },
            DatabaseKind::Sqlite => ConnectionCredentials::Sqlite {
                database: self.database,
                path: self.path.unwrap_or_default(),
            },
        }
    }
}

pub(crate) async fn run_test(gateway: &ApiGateway, args: CredentialArgs) -> Result<()> {
    let credentials = args.into_credentials();
    let outcome = gateway.test_connection(&credentials).await;
    if let Some(result) = outcome.data()
        && !result.success
    {
        tracing::warn!(db = %credentials.target(), message = %result.message, "connection test failed");
    }
    print_outcome(outcome)
}

pub(crate) async fn run_connect(gateway: &ApiGateway, args: CredentialArgs) -> Result<()> {
    let credentials = args.into_credentials();
    print_outcome(gateway.connect(&credentials).await)
}
