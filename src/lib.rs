//! lawg API client library.
//!
//! A Rust client for the lawg logging and analytics API: projects, feeds,
//! logs and numeric insights. Every call is validated client-side before it
//! is sent, and every response is checked against the expected shape before
//! it is handed back.
//!
//! # Quick Start
//!
//! ```no_run
//! use lawg::{LawgClient, NewLog, Pagination};
//!
//! #[tokio::main]
//! async fn main() -> lawg::Result<()> {
//!     // Create client from environment variables
//!     let client = LawgClient::from_env()?;
//!     let project = client.project("acme");
//!
//!     // Create a feed and log to it
//!     let feed = project.feed("releases").create(None, Some("📦")).await?;
//!     let mut log = feed.log(NewLog::new("Deployed").description("v1.2.0")).await?;
//!     println!("Logged {}", log.id);
//!
//!     // Bump a counter; the server reports the new value
//!     let signups = project.increment("insight_123", 1.0).await?;
//!     println!("{} = {}", signups.title, signups.value);
//!
//!     // Page through logs
//!     let page = feed.fetch_logs(Pagination::new(10, 0)).await?;
//!     println!("{} logs on the first page", page.len());
//!
//!     log.delete().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Each API call is a pure function in [`resources`] that validates its
//! input and returns an [`Operation`]. Executing an operation is the only
//! step that does I/O, and it exists twice:
//!
//! - [`LawgClient`] - async, on `reqwest` and `tokio`
//! - [`BlockingClient`] - blocking, on `reqwest::blocking`
//!
//! The facades in [`facade`] are generic over the client, so
//! `Log<LawgClient>` has `async fn delete` and `Log<BlockingClient>` has a
//! blocking one with the same checks.
//!
//! Partial updates use [`Patch`] to tell "leave unchanged" apart from
//! "clear" (`null`).
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `LAWG_DEV_API_TOKEN` (required) - Your lawg API token
//! - `LAWG_DEV_API` (optional) - API root (defaults to `https://api.lawg.dev`)

pub mod blocking;
pub mod cli;
mod client;
mod error;
pub mod facade;
mod models;
pub mod operation;
pub mod output;
mod pagination;
mod patch;
pub mod request;
pub mod resources;
pub mod response;
pub mod schema;
mod templates;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use blocking::BlockingClient;
pub use client::LawgClient;
pub use error::{FieldError, FieldIssue, HttpErrorKind, LawgError, Result, ValidationErrors};
pub use operation::Operation;
pub use pagination::{Page, Pagination, DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_LIMIT};
pub use patch::{Patch, Payload};
pub use templates::{EventTemplate, EventTemplates};

// Re-export facades
pub use facade::{Feed, FeedManager, Insight, Log, Project, ProjectManager};

// Re-export models
pub use models::{
    // Project types
    Member,
    ProjectInfo,
    // Feed types
    FeedEdit,
    FeedInfo,
    // Log types
    LogEdit,
    LogInfo,
    NewLog,
    TagValue,
    Tags,
    // Insight types
    InsightEdit,
    InsightInfo,
    InsightValue,
    NewInsight,
};
