//! Pagination utilities for lawg list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::patch::Payload;

/// Page size the API uses when none is given.
pub const DEFAULT_LIMIT: u32 = 25;

/// Offset the API uses when none is given.
pub const DEFAULT_OFFSET: u32 = 0;

/// Largest page size the API accepts.
pub const MAX_LIMIT: u32 = 100;

/// A page of results from the lawg API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Page size that was requested.
    pub limit: u32,
    /// Number of items skipped before this page.
    pub offset: u32,
    /// Whether there may be more items after this page.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and the effective pagination.
    #[must_use]
    pub fn new(items: Vec<T>, limit: u32, offset: u32) -> Self {
        let has_more = items.len() >= limit as usize;
        Self {
            items,
            limit,
            offset,
            has_more,
        }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            limit: self.limit,
            offset: self.offset,
            has_more: self.has_more,
        }
    }

    /// Pagination for the page after this one.
    ///
    /// The offset saturates at `u32::MAX`.
    #[must_use]
    pub fn next(&self) -> Pagination {
        Pagination {
            limit: Some(self.limit),
            offset: Some(self.offset.saturating_add(self.limit)),
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of items per page (1-100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of items to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl Pagination {
    /// Create pagination for a specific window.
    #[must_use]
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Limit the API applies to this request.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Offset the API applies to this request.
    #[must_use]
    pub fn effective_offset(&self) -> u32 {
        self.offset.unwrap_or(DEFAULT_OFFSET)
    }

    /// Query payload; absent values are left out.
    pub(crate) fn to_payload(self) -> Result<Payload> {
        Payload::new()
            .optional("limit", self.limit)?
            .optional("offset", self.offset)
    }
}
