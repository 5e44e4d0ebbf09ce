//! # Pagewise
//!
//! A reusable engine for sorting and paginating large result sets produced by
//! any queryable data source.
//!
//! ## Features
//!
//! - **Whitelist-Governed Sorting**: Untrusted column names resolve to typed sort keys or are ignored
//! - **No Runtime Reflection**: Record types register sortable fields in a static table
//! - **Deterministic Pages**: Default and identity fallbacks, identity tiebreaker
//! - **Two Strategies**: Exact count (two round-trips) or over-fetch probe (one round-trip)
//! - **Never Fails on Bad Input**: Page numbers and sizes are clamped, not rejected
//! - **Cancellation**: A single token covers every round-trip
//! - **Configuration-Based**: Per-resource sorting policy via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewise::prelude::*;
//!
//! sortable_record!(Car, {
//!     "Id" => id: i64,
//!     "Name" => name: String,
//!     "EnginePower" => engine_power: i32,
//! });
//!
//! let store = InMemoryStore::from_rows(cars);
//! let query = store
//!     .query()?
//!     .filter(Predicate::contains("Name", "toy"));
//!
//! let sort = SortOptions::default()
//!     .with_whitelist(["Name", "EnginePower", "Id"])
//!     .with_default("Id", false);
//!
//! let request = PageRequest::new(2, 10).sort_by("enginepower").descending(true);
//! let page = paginate(
//!     query,
//!     &request,
//!     &PaginationOptions::default(),
//!     &sort,
//!     &CancellationToken::new(),
//! )
//! .await?;
//!
//! println!("{} of {:?} pages", page.meta.page_number, page.meta.total_pages);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::PagingError,
        field::{FieldValue, SortValue, ValueType},
        ordering::{SortOptions, apply_ordering},
        paginate::{FetchStrategy, Paginator, execute, paginate, paginate_projected},
        query::{
            NormalizedPage, PageMeta, PageRequest, PaginatedResult, PaginationOptions,
            compute_meta, normalize,
        },
        record::{FieldDescriptor, Record},
        sort::{ResolvedSortKey, SortableFieldSet, resolve},
        store::{Identity, Predicate, Projector, Queryable},
    };

    // === Macros ===
    pub use crate::{impl_sortable_record, sortable_record};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::{InMemoryQuery, InMemoryStore};

    // === Config ===
    pub use crate::config::PagingConfig;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use tokio_util::sync::CancellationToken;
}
