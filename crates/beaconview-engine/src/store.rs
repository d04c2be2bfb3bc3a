//! The external column store, seen as a SQL-over-HTTP service.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;

/// Read-only aggregate-query capability of the external column store.
///
/// The engine depends on this trait rather than the HTTP client so
/// tests can substitute an in-memory store. All engine queries are
/// idempotent reads; retry policy belongs to the caller's transport,
/// not here.
#[async_trait::async_trait]
pub trait AggregateStore: Send + Sync + 'static {
    /// Execute a SELECT and return the response's `data` rows.
    async fn query(&self, sql: &str) -> Result<Vec<Value>>;
}

/// HTTP client for the column store's SQL endpoint.
///
/// The endpoint takes the SQL text as the POST body, authenticates with
/// a bearer token, and answers `{"data": [...]}` when asked for JSON
/// output. The API has no bound-parameter mechanism, so every literal
/// in the SQL must go through [`crate::sql::quote`] before it reaches
/// this client.
#[derive(Clone)]
pub struct HttpStoreClient {
    client: Client,
    url: String,
    token: String,
}

impl HttpStoreClient {
    pub fn new(url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl AggregateStore for HttpStoreClient {
    async fn query(&self, sql: &str) -> Result<Vec<Value>> {
        let mut url = reqwest::Url::parse(&self.url).context("invalid store URL")?;
        url.query_pairs_mut().append_pair("default_format", "JSON");

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .body(sql.to_string())
            .send()
            .await
            .context("store HTTP request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("store error {status}: {body}");
        }

        let json: Value = resp.json().await.context("store response parse failed")?;
        Ok(json
            .get("data")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default())
    }
}
