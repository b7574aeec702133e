use async_trait::async_trait;
use dbchat_core::{
    ConnectResult, ConnectionCredentials, ConnectionTestResult, HealthStatus, QueryResponse,
    SchemaEnvelope, StatusMessage, TableInfo, TableList,
};

use crate::gateway::ApiGateway;
use crate::outcome::ApiOutcome;

/// Backend operations a chat session depends on.
///
/// Implementations must never fail outside of [`ApiOutcome::Failure`].
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn check_health(&self) -> ApiOutcome<HealthStatus>;

    async fn send_query(&self, question: &str) -> ApiOutcome<QueryResponse>;

    async fn get_schema(&self) -> ApiOutcome<SchemaEnvelope>;

    async fn refresh_schema(&self) -> ApiOutcome<StatusMessage>;

    async fn get_tables(&self) -> ApiOutcome<TableList>;

    async fn get_table_info(&self, table_name: &str) -> ApiOutcome<TableInfo>;

    async fn clear_history(&self) -> ApiOutcome<StatusMessage>;

    async fn test_connection(
        &self,
        credentials: &ConnectionCredentials,
    ) -> ApiOutcome<ConnectionTestResult>;

    async fn connect(&self, credentials: &ConnectionCredentials) -> ApiOutcome<ConnectResult>;
}

#[async_trait]
impl ChatApi for ApiGateway {
    async fn check_health(&self) -> ApiOutcome<HealthStatus> {
        Self::check_health(self).await
    }

    async fn send_query(&self, question: &str) -> ApiOutcome<QueryResponse> {
        Self::send_query(self, question).await
    }

    async fn get_schema(&self) -> ApiOutcome<SchemaEnvelope> {
        Self::get_schema(self).await
    }

    async fn refresh_schema(&self) -> ApiOutcome<StatusMessage> {
        Self::refresh_schema(self).await
    }

    async fn get_tables(&self) -> ApiOutcome<TableList> {
        Self::get_tables(self).await
    }

    async fn get_table_info(&self, table_name: &str) -> ApiOutcome<TableInfo> {
        Self::get_table_info(self, table_name).await
    }

    async fn clear_history(&self) -> ApiOutcome<StatusMessage> {
        Self::clear_history(self).await
    }

    async fn test_connection(
        &self,
        credentials: &ConnectionCredentials,
    ) -> ApiOutcome<ConnectionTestResult> {
        Self::test_connection(self, credentials).await
    }

    async fn connect(&self, credentials: &ConnectionCredentials) -> ApiOutcome<ConnectResult> {
        Self::connect(self, credentials).await
    }
}
