use dbchat_core::{
    ConnectResult, ConnectionCredentials, ConnectionTestResult, HealthStatus, QueryResponse,
    SchemaEnvelope, StatusMessage, TableInfo, TableList,
};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::outcome::ApiOutcome;

/// Maximum body length quoted in decode errors.
const MAX_BODY_PREVIEW: usize = 200;

/// The backend operations the gateway exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CheckHealth,
    SendQuery,
    GetSchema,
    RefreshSchema,
    GetTables,
    GetTableInfo,
    ClearHistory,
    TestConnection,
    Connect,
}

impl Operation {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckHealth => "check_health",
            Self::SendQuery => "send_query",
            Self::GetSchema => "get_schema",
            Self::RefreshSchema => "refresh_schema",
            Self::GetTables => "get_tables",
            Self::GetTableInfo => "get_table_info",
            Self::ClearHistory => "clear_history",
            Self::TestConnection => "test_connection",
            Self::Connect => "connect",
        }
    }

    /// Error text reported when the underlying failure carries no message.
    #[must_use]
    pub const fn fallback_message(&self) -> &'static str {
        match self {
            Self::CheckHealth => "Health check failed",
            Self::SendQuery => "Failed to send query",
            Self::GetSchema => "Failed to fetch schema",
            Self::RefreshSchema => "Failed to refresh schema",
            Self::GetTables => "Failed to fetch tables",
            Self::GetTableInfo => "Failed to fetch table info",
            Self::ClearHistory => "Failed to clear history",
            Self::TestConnection => "Failed to test connection",
            Self::Connect => "Failed to connect",
        }
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    question: &'a str,
}

/// Stateless client for the backend API.
///
/// Every operation is a single round-trip and resolves to an [`ApiOutcome`];
/// transport errors, non-2xx statuses and undecodable bodies all become
/// [`ApiOutcome::Failure`].
#[derive(Debug, Clone)]
pub struct ApiGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiGateway {
    /// Creates a gateway for the given backend.
    ///
    /// # Errors
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be built (TLS backend failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::ClientInit(format!("invalid base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::ClientInit(format!(
                "base URL must be an http(s) URL: {}",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Gateway configured from `DBCHAT_API_BASE` / `DBCHAT_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// See [`ApiGateway::new`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&ClientConfig::from_env())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub async fn check_health(&self) -> ApiOutcome<HealthStatus> {
        self.request(Operation::CheckHealth, Method::GET, &["health"], None::<&()>).await
    }

    pub async fn send_query(&self, question: &str) -> ApiOutcome<QueryResponse> {
        let body = QueryRequest { question };
        self.request(Operation::SendQuery, Method::POST, &["query"], Some(&body)).await
    }

    pub async fn get_schema(&self) -> ApiOutcome<SchemaEnvelope> {
        self.request(Operation::GetSchema, Method::GET, &["schema"], None::<&()>).await
    }

    pub async fn refresh_schema(&self) -> ApiOutcome<StatusMessage> {
        self.request(Operation::RefreshSchema, Method::POST, &["schema", "refresh"], None::<&()>)
            .await
    }

    pub async fn get_tables(&self) -> ApiOutcome<TableList> {
        self.request(Operation::GetTables, Method::GET, &["tables"], None::<&()>).await
    }

    /// The table name is sent as a single, percent-encoded path segment.
    ///
    /// Names that URL normalization would collapse (empty, `.` or `..`) never
    /// address a table, so they fail without a request.
    pub async fn get_table_info(&self, table_name: &str) -> ApiOutcome<TableInfo> {
        let op = Operation::GetTableInfo;
        if matches!(table_name, "" | "." | "..") {
            return finish(op, Err(ApiError::InvalidTableName(table_name.to_owned())));
        }
        self.request(op, Method::GET, &["tables", table_name], None::<&()>).await
    }

    pub async fn clear_history(&self) -> ApiOutcome<StatusMessage> {
        self.request(Operation::ClearHistory, Method::POST, &["history", "clear"], None::<&()>)
            .await
    }

    /// Invalid credentials are reported without contacting the backend.
    pub async fn test_connection(
        &self,
        credentials: &ConnectionCredentials,
    ) -> ApiOutcome<ConnectionTestResult> {
        let op = Operation::TestConnection;
        if let Err(e) = credentials.validate() {
            return finish(op, Err(e.into()));
        }
        tracing::debug!(db = %credentials.target(), "testing database connection");
        self.request(op, Method::POST, &["connection", "test"], Some(credentials)).await
    }

    /// Invalid credentials are reported without contacting the backend.
    pub async fn connect(&self, credentials: &ConnectionCredentials) -> ApiOutcome<ConnectResult> {
        let op = Operation::Connect;
        if let Err(e) = credentials.validate() {
            return finish(op, Err(e.into()));
        }
        tracing::debug!(db = %credentials.target(), "connecting backend to database");
        self.request(op, Method::POST, &["connection", "connect"], Some(credentials)).await
    }

    async fn request<T, B>(
        &self,
        op: Operation,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> ApiOutcome<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        finish(op, self.round_trip(op, method, segments, body).await)
    }

    async fn round_trip<T, B>(
        &self,
        op: Operation,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(segments)?;
        tracing::debug!(operation = op.as_str(), %method, %url, "backend request");

        let mut builder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            context: format!("{} response (body: {})", op.as_str(), truncate(&text, MAX_BODY_PREVIEW)),
            source: e,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::ClientInit(format!("cannot extend base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn finish<T>(op: Operation, result: Result<T, ApiError>) -> ApiOutcome<T> {
    match result {
        Ok(data) => ApiOutcome::Success { data },
        Err(err) => {
            tracing::warn!(operation = op.as_str(), error = %err, "backend call failed");
            let error = err.message().unwrap_or_else(|| op.fallback_message().to_owned());
            ApiOutcome::Failure { error }
        },
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
