//! Pagination execution
//!
//! Two mutually exclusive strategies slice an ordered query into a page:
//!
//! - [`FetchStrategy::ExactCount`]: one `COUNT` over the filtered query plus
//!   one `skip/take` fetch. Two round-trips; exact totals.
//! - [`FetchStrategy::OverFetchProbe`]: a single fetch of `page_size + 1`
//!   rows. The extra row only signals that a next page exists and is trimmed
//!   before returning. Totals stay unknown.
//!
//! Either way a result is assembled only once every round-trip has
//! completed; cancellation at any point discards partial work.

use crate::core::error::PagingError;
use crate::core::ordering::{SortOptions, apply_ordering};
use crate::core::query::{
    NormalizedPage, PageRequest, PaginatedResult, PaginationOptions, compute_meta,
};
use crate::core::store::{Identity, Projector, Queryable};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// How a page is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStrategy {
    /// Count plus fetch; `total_count`, `total_pages` and `has_next` are set
    ExactCount,

    /// Fetch one extra row; only `has_next_probe` is set
    OverFetchProbe,
}

impl FetchStrategy {
    pub fn for_request(request: &PageRequest) -> Self {
        if request.include_total_count {
            FetchStrategy::ExactCount
        } else {
            FetchStrategy::OverFetchProbe
        }
    }
}

/// Race a data-source round-trip against cancellation
async fn round_trip<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, PagingError>
where
    F: Future<Output = anyhow::Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PagingError::Cancelled),
        result = fut => result.map_err(PagingError::DataSource),
    }
}

/// Run one strategy against an already-ordered query
///
/// `query` must carry the ordering both slices rely on; an unordered query
/// still executes but its page boundaries are not reproducible.
pub async fn execute<Q, P>(
    query: Q,
    page: NormalizedPage,
    strategy: FetchStrategy,
    projector: &P,
    options: &PaginationOptions,
    cancel: &CancellationToken,
) -> Result<PaginatedResult<P::Output>, PagingError>
where
    Q: Queryable,
    P: Projector<Q::Item>,
{
    if !query.is_ordered() {
        tracing::warn!(
            page_number = page.page_number(),
            "paginating an unordered query, page boundaries are not stable"
        );
    }

    tracing::debug!(
        page_number = page.page_number(),
        page_size = page.page_size(),
        strategy = ?strategy,
        "executing page fetch"
    );

    let result = match strategy {
        FetchStrategy::ExactCount => {
            let counted = query.clone();
            let sliced = query.skip(page.offset()).take(page.page_size());

            let count = round_trip(cancel, counted.count());
            let fetch = round_trip(cancel, sliced.materialize_projected(projector));

            let (total, items) = if options.concurrent_count {
                tokio::try_join!(count, fetch)?
            } else {
                let total = count.await?;
                let items = fetch.await?;
                (total, items)
            };

            PaginatedResult {
                items,
                meta: compute_meta(page.page_number(), page.page_size(), Some(total)),
            }
        }
        FetchStrategy::OverFetchProbe => {
            let sliced = query.skip(page.offset()).take(page.probe_limit());
            let mut items = round_trip(cancel, sliced.materialize_projected(projector)).await?;

            let has_next = items.len() as u64 > page.page_size();
            items.truncate(usize::try_from(page.page_size()).unwrap_or(usize::MAX));

            PaginatedResult {
                items,
                meta: compute_meta(page.page_number(), page.page_size(), None).with_probe(has_next),
            }
        }
    };

    if cancel.is_cancelled() {
        return Err(PagingError::Cancelled);
    }

    Ok(result)
}

/// Normalize, order and fetch a page, projecting every row
pub async fn paginate_projected<Q, P>(
    query: Q,
    request: &PageRequest,
    pagination: &PaginationOptions,
    sort: &SortOptions,
    projector: &P,
    cancel: &CancellationToken,
) -> Result<PaginatedResult<P::Output>, PagingError>
where
    Q: Queryable,
    P: Projector<Q::Item>,
{
    let page = pagination.normalize(request.page_number, request.page_size);
    let ordered = apply_ordering(query, request, sort);

    execute(
        ordered,
        page,
        FetchStrategy::for_request(request),
        projector,
        pagination,
        cancel,
    )
    .await
}

/// Normalize, order and fetch a page of records
pub async fn paginate<Q>(
    query: Q,
    request: &PageRequest,
    pagination: &PaginationOptions,
    sort: &SortOptions,
    cancel: &CancellationToken,
) -> Result<PaginatedResult<Q::Item>, PagingError>
where
    Q: Queryable,
{
    paginate_projected(query, request, pagination, sort, &Identity, cancel).await
}

/// Reusable bundle of pagination bounds and a sorting policy
///
/// # Example
/// ```rust,ignore
/// let paginator = Paginator::new(PaginationOptions::default())
///     .with_sort(SortOptions::default().with_whitelist(["Name", "EnginePower", "Id"]));
///
/// let page = paginator
///     .paginate(store.query()?, &PageRequest::new(2, 10), &CancellationToken::new())
///     .await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paginator {
    pagination: PaginationOptions,
    sort: SortOptions,
}

impl Paginator {
    pub fn new(pagination: PaginationOptions) -> Self {
        Self {
            pagination,
            sort: SortOptions::default(),
        }
    }

    pub fn with_sort(self, sort: SortOptions) -> Self {
        Self { sort, ..self }
    }

    pub fn pagination(&self) -> &PaginationOptions {
        &self.pagination
    }

    pub fn sort(&self) -> &SortOptions {
        &self.sort
    }

    pub async fn paginate<Q: Queryable>(
        &self,
        query: Q,
        request: &PageRequest,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<Q::Item>, PagingError> {
        paginate(query, request, &self.pagination, &self.sort, cancel).await
    }

    pub async fn paginate_projected<Q, P>(
        &self,
        query: Q,
        request: &PageRequest,
        projector: &P,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<P::Output>, PagingError>
    where
        Q: Queryable,
        P: Projector<Q::Item>,
    {
        paginate_projected(
            query,
            request,
            &self.pagination,
            &self.sort,
            projector,
            cancel,
        )
        .await
    }
}
