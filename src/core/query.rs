//! Page requests, normalization and page metadata

use serde::{Deserialize, Serialize};

/// Smallest page number; pages are 1-based
pub const MIN_PAGE_NUMBER: u64 = 1;

/// Smallest page size
pub const MIN_PAGE_SIZE: u64 = 1;

/// Default upper bound for the page size
pub const MAX_PAGE_SIZE: u64 = 100;

/// Paging and sorting parameters of a list request
///
/// Values are carried raw, exactly as received. Bounds are applied by
/// [`PaginationOptions::normalize`], which produces a separate
/// [`NormalizedPage`] and leaves the request untouched.
///
/// # Example
/// ```rust,ignore
/// // From a query string:
/// // GET /cars?page_number=2&page_size=10&sort_by=name&descending=true
/// let request: PageRequest = serde_json::from_value(json!({
///     "page_number": 2,
///     "page_size": 10,
///     "sort_by": "name",
///     "descending": true,
/// }))?;
///
/// // Or in code:
/// let request = PageRequest::new(2, 10).sort_by("name").descending(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// Requested page number (1-based, may be out of range)
    #[serde(alias = "page")]
    pub page_number: i64,

    /// Requested page size (may be out of range)
    #[serde(alias = "limit")]
    pub page_size: i64,

    /// Column to sort by; blank means "use the default ordering"
    #[serde(alias = "sort")]
    pub sort_by: Option<String>,

    /// Sort direction for `sort_by`
    #[serde(alias = "desc")]
    pub descending: bool,

    /// Run an exact count (two round-trips) instead of the over-fetch probe
    pub include_total_count: bool,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 10,
            sort_by: None,
            descending: false,
            include_total_count: true,
        }
    }
}

impl PageRequest {
    /// Request a page with the default sort and an exact count
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
            ..Self::default()
        }
    }

    /// Set the requested sort column
    pub fn sort_by(self, column: impl Into<String>) -> Self {
        Self {
            sort_by: Some(column.into()),
            ..self
        }
    }

    /// Set the sort direction
    pub fn descending(self, descending: bool) -> Self {
        Self { descending, ..self }
    }

    /// Choose between the exact-count and the over-fetch strategy
    pub fn with_total_count(self, include_total_count: bool) -> Self {
        Self {
            include_total_count,
            ..self
        }
    }

    /// The requested sort column, if it is not blank
    pub fn requested_sort(&self) -> Option<&str> {
        self.sort_by
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Page number and size after clamping
///
/// Only [`PaginationOptions::normalize`] builds one, so `page_number` and
/// `page_size` are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedPage {
    page_number: u64,
    page_size: u64,
}

impl NormalizedPage {
    /// One-based page number
    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        self.page_number.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Rows fetched by the over-fetch probe (one past the page)
    pub fn probe_limit(&self) -> u64 {
        self.page_size.saturating_add(1)
    }
}

/// Bounds and execution settings for pagination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    /// Largest page size a request may ask for (floored at 1)
    pub max_page_size: u64,

    /// Issue the count and the page fetch concurrently under the exact-count strategy
    pub concurrent_count: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            max_page_size: MAX_PAGE_SIZE,
            concurrent_count: false,
        }
    }
}

impl PaginationOptions {
    /// Clamp raw paging input into valid bounds
    ///
    /// Never fails: page numbers below 1 become 1, page sizes are clamped
    /// into `[1, max_page_size]`.
    pub fn normalize(&self, page_number: i64, page_size: i64) -> NormalizedPage {
        let max_page_size = self.max_page_size.max(MIN_PAGE_SIZE);
        let page_number = u64::try_from(page_number)
            .unwrap_or(MIN_PAGE_NUMBER)
            .max(MIN_PAGE_NUMBER);
        let page_size = u64::try_from(page_size)
            .unwrap_or(MIN_PAGE_SIZE)
            .clamp(MIN_PAGE_SIZE, max_page_size);

        NormalizedPage {
            page_number,
            page_size,
        }
    }
}

/// Clamp raw paging input into the default bounds (`[1, ∞)` and `[1, 100]`)
pub fn normalize(page_number: i64, page_size: i64) -> NormalizedPage {
    PaginationOptions::default().normalize(page_number, page_size)
}

/// Pagination metadata
///
/// `total_pages` and `has_next` are derived from `total_count` and are
/// present exactly when it is. `has_next_probe` is the separate signal set
/// by the over-fetch strategy; it is never folded into `has_next`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (starts at 1)
    pub page_number: u64,

    /// Number of items per page
    pub page_size: u64,

    /// Total number of items (after filters), when counted
    pub total_count: Option<u64>,

    /// Total number of pages, when counted
    pub total_pages: Option<u64>,

    /// Whether there is a previous page
    pub has_previous: bool,

    /// Whether there is a next page, when counted
    pub has_next: Option<bool>,

    /// Whether the over-fetch probe saw a row past this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next_probe: Option<bool>,
}

impl PageMeta {
    /// Attach the over-fetch probe result
    pub fn with_probe(self, has_next_probe: bool) -> Self {
        Self {
            has_next_probe: Some(has_next_probe),
            ..self
        }
    }
}

/// Derive page metadata from page number, page size and an optional total
///
/// Pure function. A zero page size is treated as 1 so the page count is
/// always defined.
pub fn compute_meta(page_number: u64, page_size: u64, total_count: Option<u64>) -> PageMeta {
    let page_size = page_size.max(MIN_PAGE_SIZE);
    let total_pages = total_count.map(|total| total.div_ceil(page_size));

    PageMeta {
        page_number,
        page_size,
        total_count,
        total_pages,
        has_previous: page_number > MIN_PAGE_NUMBER,
        has_next: total_pages.map(|pages| page_number < pages),
        has_next_probe: None,
    }
}

/// Paginated result structure
///
/// `items.len()` equals `meta.page_size` on every page except possibly the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// The rows of this page, in query order
    pub items: Vec<T>,

    /// Pagination metadata
    pub meta: PageMeta,
}

impl<T> PaginatedResult<T> {
    /// Map every item, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    /// Whether this page holds no rows
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
