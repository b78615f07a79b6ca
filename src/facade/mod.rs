//! Entity facades and managers.
//!
//! Managers ([`ProjectManager`], [`FeedManager`]) bind the identity an
//! operation needs and hold no cached state. Facades ([`Project`], [`Feed`],
//! [`Log`], [`Insight`]) wrap the last payload the API returned for one
//! entity and move from live to deleted exactly once.
//!
//! Every type is generic over the client. With
//! [`LawgClient`](crate::LawgClient) the methods are `async`; with
//! [`BlockingClient`](crate::BlockingClient) they block. Validation and
//! state handling are shared; only the transport call differs.

mod feed;
mod insight;
mod log;
mod project;

pub use feed::{Feed, FeedManager};
pub use insight::Insight;
pub use log::Log;
pub use project::{Project, ProjectManager};

use crate::error::{LawgError, Result};
use crate::pagination::{Page, Pagination};

/// Shared live/deleted state of a facade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Lifecycle {
    deleted: bool,
}

impl Lifecycle {
    fn ensure_live(self, kind: &'static str) -> Result<()> {
        if self.deleted {
            Err(LawgError::AlreadyDeleted(kind))
        } else {
            Ok(())
        }
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

fn page_of<T, U>(items: Vec<T>, pagination: Pagination, wrap: impl FnMut(T) -> U) -> Page<U> {
    Page::new(
        items,
        pagination.effective_limit(),
        pagination.effective_offset(),
    )
    .map(wrap)
}
