//! A single prepared API call.
//!
//! Resource functions build an [`Operation`] without touching the network;
//! the async and blocking clients execute it and decode the response. Both
//! clients share every step except the transport call itself.

use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{LawgError, Result};
use crate::request::{build_request, prepare_query, WithSchema};
use crate::response::{normalize_response, ResponseShape};

/// Path templates, relative to `{api}/v1/`.
pub mod routes {
    pub const PROJECTS: &str = "projects";
    pub const PROJECT: &str = "projects/{namespace}";
    pub const INVITE: &str = "projects/{namespace}/invites/{username}";
    pub const MEMBER: &str = "projects/{namespace}/members/{username}";
    pub const FEEDS: &str = "projects/{namespace}/feeds";
    pub const FEED: &str = "projects/{namespace}/feeds/{feed}";
    pub const LOGS: &str = "projects/{namespace}/feeds/{feed}/logs";
    pub const LOG: &str = "projects/{namespace}/feeds/{feed}/logs/{log_id}";
    pub const INSIGHTS: &str = "projects/{namespace}/insights";
    pub const INSIGHT: &str = "projects/{namespace}/insights/{insight_id}";
}

/// A validated request plus how to read its response into `T`.
#[derive(Debug, Clone)]
pub struct Operation<T> {
    pub method: Method,
    /// Path relative to the client's base URL, slugs already substituted.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub response: Option<ResponseShape>,
    output: PhantomData<fn() -> T>,
}

impl<T> Operation<T> {
    /// Build and validate an operation.
    ///
    /// # Errors
    ///
    /// Fails before any I/O if a slug or body field is invalid, or if the
    /// body is empty after unchanged fields are dropped.
    pub fn new(
        method: Method,
        template: &str,
        slugs: Option<WithSchema>,
        body: Option<WithSchema>,
    ) -> Result<Self> {
        let (path, body) = build_request(template, body, slugs)?;
        Ok(Self {
            method,
            path,
            query: Vec::new(),
            body,
            response: None,
            output: PhantomData,
        })
    }

    /// Attach validated query parameters.
    pub fn with_query(mut self, query: WithSchema) -> Result<Self> {
        self.query = prepare_query(Some(query))?;
        Ok(self)
    }

    /// Expect a payload of this shape in the success envelope.
    #[must_use]
    pub fn returning(mut self, shape: ResponseShape) -> Self {
        self.response = Some(shape);
        self
    }
}

impl<T: DeserializeOwned> Operation<T> {
    /// Normalize a raw response and deserialize its payload.
    ///
    /// Operations without a response shape decode to `()`.
    ///
    /// # Errors
    ///
    /// Returns [`LawgError::EmptyResponse`] when a shaped operation gets a
    /// `204 No Content` and `T` cannot be built from nothing.
    pub fn decode(&self, status: u16, body: &str) -> Result<T> {
        let data = normalize_response(status, body, self.response)?;
        if data.is_null() && self.response.is_some() {
            return serde_json::from_value(Value::Null)
                .map_err(|_| LawgError::EmptyResponse(status));
        }
        Ok(serde_json::from_value(data)?)
    }
}
