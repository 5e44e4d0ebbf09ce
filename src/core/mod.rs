//! Core module containing the paging engine and its contract types

pub mod error;
pub mod field;
pub mod ordering;
pub mod paginate;
pub mod query;
pub mod record;
pub mod sort;
pub mod store;

pub use error::PagingError;
pub use field::{FieldValue, SortValue, ValueType};
pub use ordering::{SortOptions, apply_ordering};
pub use paginate::{FetchStrategy, Paginator, execute, paginate, paginate_projected};
pub use query::{
    NormalizedPage, PageMeta, PageRequest, PaginatedResult, PaginationOptions, compute_meta,
    normalize,
};
pub use record::{FieldDescriptor, Record};
pub use sort::{ResolvedSortKey, SortableFieldSet, resolve};
pub use store::{Identity, Predicate, Projector, Queryable};
