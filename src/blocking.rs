//! Blocking lawg API client.
//!
//! Same operations as [`LawgClient`](crate::LawgClient), run to completion
//! on the calling thread. Do not use from inside an async runtime; use
//! `tokio::task::spawn_blocking` or the async client there.

use std::sync::Arc;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use url::Url;

use crate::client::{env_config, versioned_base_url, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::Result;
use crate::facade::ProjectManager;
use crate::operation::Operation;

/// Blocking lawg API client.
///
/// # Example
///
/// ```no_run
/// use lawg::BlockingClient;
///
/// # fn example() -> lawg::Result<()> {
/// let client = BlockingClient::from_env()?;
/// let mut insight = client.project("acme").increment("insight_123", 1.0)?;
/// println!("{} = {}", insight.title, insight.value);
/// insight.set(0.0)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BlockingClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl BlockingClient {
    /// Create a client from `LAWG_DEV_API_TOKEN` and `LAWG_DEV_API`.
    pub fn from_env() -> Result<Self> {
        let (token, api_url) = env_config()?;
        Self::new(&token, &api_url)
    }

    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let base_url = versioned_base_url(api_url)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Operations on the project with this namespace.
    pub fn project(&self, namespace: impl Into<String>) -> ProjectManager<Self> {
        ProjectManager::new(self.clone(), namespace.into())
    }

    /// Send a prepared operation and decode its response.
    #[tracing::instrument(skip(self, op), fields(method = %op.method, path = %op.path))]
    pub fn execute<T: DeserializeOwned>(&self, op: Operation<T>) -> Result<T> {
        let url = self.base_url.join(&op.path)?;

        let mut request = self
            .http
            .request(op.method.clone(), url)
            .header(AUTHORIZATION, &self.token);
        if !op.query.is_empty() {
            request = request.query(&op.query);
        }
        if let Some(body) = &op.body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        tracing::debug!(status, "lawg response");

        op.decode(status, &body)
    }
}
