//! Pagination types for list operations.

use crate::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub size: u32,
}

impl PageRequest {
    /// The default page number.
    pub const DEFAULT_PAGE: u32 = 1;
    /// The default page size.
    pub const DEFAULT_SIZE: u32 = 10;
    /// The maximum allowed page size.
    pub const MAX_SIZE: u32 = 100;

    /// Creates a new page request.
    ///
    /// Page and size must both be at least 1; sizes above [`Self::MAX_SIZE`]
    /// are clamped.
    pub fn new(page: u32, size: u32) -> RosterResult<Self> {
        if page == 0 {
            return Err(RosterError::validation("page must be at least 1"));
        }
        if size == 0 {
            return Err(RosterError::validation("page size must be at least 1"));
        }

        Ok(Self {
            page,
            size: size.min(Self::MAX_SIZE),
        })
    }

    /// Builds a page request from optional query parameters, applying defaults.
    pub fn from_parts(page: Option<u32>, size: Option<u32>) -> RosterResult<Self> {
        Self::new(
            page.unwrap_or(Self::DEFAULT_PAGE),
            size.unwrap_or(Self::DEFAULT_SIZE),
        )
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            size: Self::DEFAULT_SIZE,
        }
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.size as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results.
///
/// `total_count` is the size of the whole filtered population, not of this
/// window. It comes from a separate count query and may disagree with
/// `records` under concurrent writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub records: Vec<T>,
    /// The total number of items across all pages.
    pub total_count: u64,
    /// The current page number (1-indexed).
    pub page: u32,
    /// The requested page size.
    pub page_size: u32,
    /// The total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(records: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        let size = u64::from(request.size);
        Self {
            records,
            total_count,
            page: request.page,
            page_size: request.size,
            total_pages: total_count.div_ceil(size),
        }
    }
}
