//! Pagination primitives for resource listings.
//!
//! This module provides the three pagination types shared by services and
//! the CRUD controller:
//!
//! - [`PageRequest`]: the page/limit pair a caller asks a service for
//! - [`Pagination`]: the page/limit/total cursor the controller owns
//! - [`Listing`]: one page of data together with the filtered total
//!
//! # Total Semantics
//!
//! `total` always means the number of items matching the *filters*, counted
//! before the page slice is taken. It is reported by the service and never
//! recomputed on the client side.

use serde::{Deserialize, Serialize};

/// Default page size used when a controller is constructed.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// A request for one page of a filtered listing.
///
/// `page` is 1-based. Both fields are clamped away from zero on
/// construction so a service never has to defend against a `0` page or
/// limit.
///
/// # Example
///
/// ```rust
/// use adminkit::resource::PageRequest;
///
/// let request = PageRequest::new(3, 10);
/// assert_eq!(request.offset(), 20);
///
/// // Zero values are clamped rather than rejected
/// let clamped = PageRequest::new(0, 0);
/// assert_eq!(clamped.page, 1);
/// assert_eq!(clamped.limit, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The 1-based page number.
    pub page: u32,
    /// The maximum number of items per page.
    pub limit: u32,
}

impl PageRequest {
    /// Creates a page request, clamping `page` to at least 1 and a zero
    /// `limit` to [`DEFAULT_PAGE_LIMIT`].
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { 1 } else { page },
            limit: if limit == 0 { DEFAULT_PAGE_LIMIT } else { limit },
        }
    }

    /// Returns the number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }

    /// Slices one page out of an already-filtered result set.
    ///
    /// Returns the window `[(page-1)*limit, (page-1)*limit + limit)`; a page
    /// past the end of the data yields an empty vector. Intended for
    /// in-memory service implementations — the filtered `total` must be
    /// counted *before* calling this.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

/// The pagination cursor owned by a CRUD controller.
///
/// Combines the requested window (`page`, `limit`) with the
/// service-reported `total` of the most recent successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// The 1-based page number.
    pub page: u32,
    /// The maximum number of items per page.
    pub limit: u32,
    /// Items matching the current filters, reported by the service.
    pub total: u64,
}

impl Pagination {
    /// The cursor every controller starts from: page 1, the default limit,
    /// and no known total.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total: 0,
        }
    }

    /// Returns the page request for the current window.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::initial()
    }
}

/// One page of a filtered listing, as returned by
/// [`ResourceService::list`](crate::resource::ResourceService::list).
///
/// `data` holds exactly the requested page; `total` is the filtered count
/// before pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing<T> {
    /// The items on the requested page.
    pub data: Vec<T>,
    /// The number of items matching the filters, before the page slice.
    pub total: u64,
}

impl<T> Listing<T> {
    /// Creates a listing from a page of data and the filtered total.
    #[must_use]
    pub const fn new(data: Vec<T>, total: u64) -> Self {
        Self { data, total }
    }

    /// Returns the number of items on this page (not the filtered total).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if this page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
