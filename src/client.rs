//! lawg API client.
//!
//! Async HTTP client that handles authentication and executes prepared
//! [`Operation`]s. Entity-level calls live on the facades returned by
//! [`LawgClient::project`].

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{LawgError, Result};
use crate::facade::ProjectManager;
use crate::operation::Operation;

pub(crate) const DEFAULT_API_URL: &str = "https://api.lawg.dev";
pub(crate) const USER_AGENT: &str = concat!("lawg/", env!("CARGO_PKG_VERSION"));
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TOKEN_VAR: &str = "LAWG_DEV_API_TOKEN";
const API_URL_VAR: &str = "LAWG_DEV_API";
const API_VERSION: &str = "v1/";

/// Read the token and API root from the environment.
pub(crate) fn env_config() -> Result<(String, String)> {
    let token = env::var(TOKEN_VAR).map_err(|_| {
        LawgError::ConfigMissing(format!("{TOKEN_VAR} environment variable not set"))
    })?;
    let api_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    Ok((token, api_url))
}

/// `{api_url}/v1/`, tolerating a trailing slash on `api_url`.
pub(crate) fn versioned_base_url(api_url: &str) -> Result<Url> {
    let root = if api_url.ends_with('/') {
        api_url.to_string()
    } else {
        format!("{api_url}/")
    };
    Ok(Url::parse(&root)?.join(API_VERSION)?)
}

/// Async lawg API client.
///
/// This struct is cheaply cloneable; clones share the underlying connection
/// pool.
///
/// # Example
///
/// ```no_run
/// use lawg::{LawgClient, NewLog};
///
/// # async fn example() -> lawg::Result<()> {
/// // Create from environment variables
/// let client = LawgClient::from_env()?;
///
/// // Or configure manually
/// let client = LawgClient::new("your-token", "https://api.lawg.dev")?;
///
/// let feed = client.project("acme").feed("releases");
/// feed.log(NewLog::new("Deployed").emoji("🚀")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LawgClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for LawgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LawgClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl LawgClient {
    /// Create a client from environment variables.
    ///
    /// Uses `LAWG_DEV_API_TOKEN` for authentication and optionally
    /// `LAWG_DEV_API` for the API root (defaults to `https://api.lawg.dev`).
    ///
    /// # Errors
    ///
    /// Returns an error if `LAWG_DEV_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let (token, api_url) = env_config()?;
        Self::new(&token, &api_url)
    }

    /// Create a new client with the provided token and API root.
    ///
    /// # Arguments
    ///
    /// * `token` - lawg API token, sent as-is in the `Authorization` header
    /// * `api_url` - API root without the version (e.g., `https://api.lawg.dev`)
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid.
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

    /// Get the versioned base URL every operation path is joined to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Operations on the project with this namespace.
    pub fn project(&self, namespace: impl Into<String>) -> ProjectManager<Self> {
        ProjectManager::new(self.clone(), namespace.into())
    }

    /// Send a prepared operation and decode its response.
    ///
    /// # Errors
    ///
    /// Returns [`LawgError::Transport`] if the request cannot be sent, or
    /// whatever [`Operation::decode`] reports for the response.
    #[tracing::instrument(skip(self, op), fields(method = %op.method, path = %op.path))]
    pub async fn execute<T: DeserializeOwned>(&self, op: Operation<T>) -> Result<T> {
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

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, "lawg response");

        op.decode(status, &body)
    }
}
