//! The abstract queryable contract the engine orchestrates

use crate::core::record::Record;
use crate::core::sort::ResolvedSortKey;
use anyhow::Result;
use async_trait::async_trait;

/// A deferred query over a data source
///
/// Composition steps (`filter`, `order_by`, `skip`, `take`) only describe the
/// query; nothing reaches the data source until `count` or one of the
/// `materialize` methods runs. Implementations are cheap to clone so the
/// same filtered query can be counted and fetched independently.
///
/// `order_by` appends a key: calling it twice orders by the first key, then
/// by the second (SQL `ORDER BY a, b`).
#[async_trait]
pub trait Queryable: Clone + Send + Sync + Sized {
    /// Record type produced by this query
    type Item: Record;

    /// Restrict rows with a predicate
    fn filter(self, predicate: Predicate) -> Self;

    /// Append a sort key
    fn order_by(self, key: ResolvedSortKey<Self::Item>, descending: bool) -> Self;

    /// Whether at least one sort key has been applied
    fn is_ordered(&self) -> bool;

    /// Skip `n` rows
    fn skip(self, n: u64) -> Self;

    /// Return at most `n` rows
    fn take(self, n: u64) -> Self;

    /// Count the rows this query would return
    async fn count(&self) -> Result<u64>;

    /// Execute the query
    async fn materialize(self) -> Result<Vec<Self::Item>>;

    /// Execute the query and map every row through `projector`
    ///
    /// The default maps after materialization. Backends that can push a
    /// projection into the data source should override this.
    async fn materialize_projected<P>(self, projector: &P) -> Result<Vec<P::Output>>
    where
        P: Projector<Self::Item>,
    {
        let rows = self.materialize().await?;
        Ok(rows.into_iter().map(|row| projector.project(row)).collect())
    }
}

/// Case-insensitive substring filter on one field
///
/// The only filter the engine knows about. It corresponds to
/// `field LIKE '%needle%'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    field: String,
    needle: String,
}

impl Predicate {
    /// Match rows whose `field` contains `needle`
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Build a predicate from optional search text; blank text means no filter
    pub fn from_search(field: impl Into<String>, search: Option<&str>) -> Option<Self> {
        search
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Self::contains(field, text))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Evaluate against a record in process
    ///
    /// A field the record does not register matches nothing.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        R::accessor(&self.field, true)
            .is_some_and(|field| field.value(record).contains_text(&self.needle))
    }
}

/// Maps a source row to the shape returned to the caller
pub trait Projector<T>: Send + Sync {
    type Output: Send;

    fn project(&self, row: T) -> Self::Output;
}

impl<T, U, F> Projector<T> for F
where
    F: Fn(T) -> U + Send + Sync,
    U: Send,
{
    type Output = U;

    fn project(&self, row: T) -> U {
        self(row)
    }
}

/// Projector that returns rows unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Send> Projector<T> for Identity {
    type Output = T;

    fn project(&self, row: T) -> T {
        row
    }
}
