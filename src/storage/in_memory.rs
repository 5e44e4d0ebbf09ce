//! In-memory implementation of Queryable for testing and development

use crate::core::record::Record;
use crate::core::sort::ResolvedSortKey;
use crate::core::store::{Predicate, Queryable};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

/// In-memory row store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryStore<R> {
    rows: Arc<RwLock<Vec<R>>>,
}

impl<R: Record + Clone> InMemoryStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a store holding `rows` in insertion order
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Append a row
    pub fn insert(&self, row: R) -> Result<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        rows.push(row);

        Ok(())
    }

    /// Number of stored rows
    pub fn len(&self) -> Result<usize> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Start a query over a snapshot of the current rows
    ///
    /// Every round-trip of the returned query (and of its clones) sees the
    /// same snapshot, regardless of later inserts.
    pub fn query(&self) -> Result<InMemoryQuery<R>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(InMemoryQuery::new(rows.clone()))
    }
}

impl<R: Record + Clone> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deferred query over an in-memory snapshot
///
/// Predicates are conjunctive. Sorting is stable, so rows that compare equal
/// on every key keep snapshot order. `skip` accumulates and `take` keeps the
/// smallest limit seen.
pub struct InMemoryQuery<R: 'static> {
    rows: Arc<Vec<R>>,
    predicates: Vec<Predicate>,
    order: Vec<(ResolvedSortKey<R>, bool)>,
    offset: u64,
    limit: Option<u64>,
}

impl<R: Record + Clone> InMemoryQuery<R> {
    /// Query over `rows`
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Arc::new(rows),
            predicates: Vec::new(),
            order: Vec::new(),
            offset: 0,
            limit: None,
        }
    }

    fn compare(&self, a: &R, b: &R) -> Ordering {
        self.order
            .iter()
            .map(|(key, descending)| {
                let ordering = key.compare(a, b);
                if *descending { ordering.reverse() } else { ordering }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    fn filtered(&self) -> Vec<&R> {
        self.rows
            .iter()
            .filter(|row| self.predicates.iter().all(|p| p.matches(*row)))
            .collect()
    }

    /// Number of rows left after the offset and limit are applied
    fn window_len(&self, matching: usize) -> u64 {
        let remaining = (matching as u64).saturating_sub(self.offset);
        self.limit.map_or(remaining, |limit| remaining.min(limit))
    }
}

impl<R: 'static> Clone for InMemoryQuery<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            predicates: self.predicates.clone(),
            order: self.order.clone(),
            offset: self.offset,
            limit: self.limit,
        }
    }
}

#[async_trait]
impl<R: Record + Clone> Queryable for InMemoryQuery<R> {
    type Item = R;

    fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    fn order_by(mut self, key: ResolvedSortKey<R>, descending: bool) -> Self {
        self.order.push((key, descending));
        self
    }

    fn is_ordered(&self) -> bool {
        !self.order.is_empty()
    }

    fn skip(mut self, n: u64) -> Self {
        self.offset = self.offset.saturating_add(n);
        self
    }

    fn take(mut self, n: u64) -> Self {
        self.limit = Some(self.limit.map_or(n, |limit| limit.min(n)));
        self
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.window_len(self.filtered().len()))
    }

    async fn materialize(self) -> Result<Vec<R>> {
        let mut matching = self.filtered();
        matching.sort_by(|a, b| self.compare(a, b));

        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.window_len(matching.len())).unwrap_or(usize::MAX);

        Ok(matching.into_iter().skip(skip).take(take).cloned().collect())
    }
}
