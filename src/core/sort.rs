//! Sort resolution: from an untrusted column name to a typed sort key
//!
//! Resolution is a pure lookup. It never touches a query, and every rejection
//! is an ordinary `None`: a blank name, a name outside the caller's whitelist
//! and a name the record type does not register all degrade to "no sort".

use crate::core::field::{FieldValue, ValueType};
use crate::core::record::{FieldDescriptor, Record, fold_case};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Case-insensitive set of field names eligible for dynamic sorting
///
/// Keeps the caller's spelling and insertion order for display and
/// serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SortableFieldSet {
    names: IndexMap<String, String>,
}

impl SortableFieldSet {
    /// Create an empty set (which, once supplied, admits nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field name
    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.names.entry(fold_case(&name)).or_insert(name);
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&fold_case(name))
    }

    /// Field names as originally spelled
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SortableFieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl From<Vec<String>> for SortableFieldSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<SortableFieldSet> for Vec<String> {
    fn from(set: SortableFieldSet) -> Self {
        set.names.into_values().collect()
    }
}

/// A sort key resolved against a record type
///
/// Carries the registered field name, its type tag and the typed accessor.
/// Backends that translate to a query language use [`field_name`](Self::field_name);
/// in-process backends use [`compare`](Self::compare).
pub struct ResolvedSortKey<R: 'static> {
    field: &'static FieldDescriptor<R>,
}

impl<R: Record> ResolvedSortKey<R> {
    pub(crate) fn new(field: &'static FieldDescriptor<R>) -> Self {
        Self { field }
    }

    /// Field name as registered on the record type
    pub fn field_name(&self) -> &'static str {
        self.field.name()
    }

    pub fn value_type(&self) -> ValueType {
        self.field.value_type()
    }

    /// Extract the sort value from a record
    pub fn value(&self, record: &R) -> FieldValue {
        self.field.value(record)
    }

    /// Typed comparison of two records on this key
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        self.field.compare(a, b)
    }

    /// Whether this key sorts on `name` (case-insensitive)
    pub fn is_field(&self, name: &str) -> bool {
        self.field.matches(name, true)
    }
}

impl<R: 'static> Clone for ResolvedSortKey<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for ResolvedSortKey<R> {}

impl<R: 'static> fmt::Debug for ResolvedSortKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSortKey")
            .field("field_name", &self.field.name())
            .field("value_type", &self.field.value_type())
            .finish()
    }
}

/// Resolve a requested column name against record type `R`
///
/// Returns `None` when the name is blank, when a whitelist is supplied and
/// does not contain the name, or when `R` has no such field. Matching is
/// case-insensitive throughout.
pub fn resolve<R: Record>(
    requested: &str,
    whitelist: Option<&SortableFieldSet>,
) -> Option<ResolvedSortKey<R>> {
    let name = requested.trim();
    if name.is_empty() {
        tracing::debug!(reason = "blank", "sort column ignored");
        return None;
    }

    if whitelist.is_some_and(|whitelist| !whitelist.contains(name)) {
        tracing::debug!(column = %name, reason = "not_whitelisted", "sort column ignored");
        return None;
    }

    match R::accessor(name, true) {
        Some(field) => Some(ResolvedSortKey::new(field)),
        None => {
            tracing::debug!(column = %name, reason = "unknown_field", "sort column ignored");
            None
        }
    }
}

/// Resolve a field the engine itself chose (identity fallback, tiebreaker)
///
/// Bypasses the whitelist, which only governs caller-influenced names.
pub(crate) fn resolve_trusted<R: Record>(name: &str) -> Option<ResolvedSortKey<R>> {
    R::accessor(name.trim(), true).map(ResolvedSortKey::new)
}
