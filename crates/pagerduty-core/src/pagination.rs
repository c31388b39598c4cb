//! Offset-based pagination for list endpoints.
//!
//! PagerDuty list responses carry `limit`, `offset`, `more` and (when requested) `total`
//! next to the item array. [`PageRequest`] describes what the caller asks for and
//! [`ListMode`] whether one page or every page is fetched.

use serde::{Deserialize, Serialize};

use crate::query::QueryParams;

/// Largest page size the API accepts.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Pagination metadata returned alongside list items.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListMeta {
    /// Page size echoed by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Offset of the first item in this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Whether more results exist after this page
    #[serde(default)]
    pub more: bool,
    /// Total result count, only present when `total=true` was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    /// Pagination metadata
    pub meta: ListMeta,
    /// Items in server order
    pub items: Vec<T>,
}

impl<T> ListPage<T> {
    /// Returns true if the server reported further pages.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.meta.more
    }

    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Pagination options sent with a list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Offset of the first item
    pub offset: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Ask the server to compute `total`
    pub total: bool,
}

impl PageRequest {
    /// Create an empty request (server defaults).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: None,
            limit: None,
            total: false,
        }
    }

    /// Set the starting offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page size, capped at [`MAX_PAGE_LIMIT`].
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(if limit > MAX_PAGE_LIMIT {
            MAX_PAGE_LIMIT
        } else {
            limit
        });
        self
    }

    /// Request the `total` count.
    #[must_use]
    pub const fn with_total(mut self, total: bool) -> Self {
        self.total = total;
        self
    }

    /// Fill unset fields from `fallback`; values already set here win.
    #[must_use]
    pub const fn or(self, fallback: Self) -> Self {
        Self {
            offset: match self.offset {
                Some(offset) => Some(offset),
                None => fallback.offset,
            },
            limit: match self.limit {
                Some(limit) => Some(limit),
                None => fallback.limit,
            },
            total: self.total || fallback.total,
        }
    }

    /// Append the pagination pairs to a query builder.
    pub fn append_to(&self, params: &mut QueryParams) {
        params.push_opt("offset", self.offset);
        params.push_opt("limit", self.limit);
        params.push_flag("total", self.total);
    }

    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut params = QueryParams::new();
        self.append_to(&mut params);
        params.into_pairs()
    }
}

/// How many pages a list call fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// A single page described by the request
    Page(PageRequest),
    /// Every page starting from the request's offset, optionally capped
    All {
        /// Starting offset and page size
        page: PageRequest,
        /// Stop once this many items have been collected
        max_items: Option<usize>,
    },
}

impl ListMode {
    /// Fetch every page with server-default page sizes.
    #[must_use]
    pub const fn all() -> Self {
        Self::All {
            page: PageRequest::new(),
            max_items: None,
        }
    }

    /// Fetch a single page.
    #[must_use]
    pub const fn page(page: PageRequest) -> Self {
        Self::Page(page)
    }

    /// Fill the mode's unset pagination fields from `fallback`.
    #[must_use]
    pub const fn or_page(self, fallback: PageRequest) -> Self {
        match self {
            Self::Page(page) => Self::Page(page.or(fallback)),
            Self::All { page, max_items } => Self::All {
                page: page.or(fallback),
                max_items,
            },
        }
    }
}

impl Default for ListMode {
    fn default() -> Self {
        Self::all()
    }
}
