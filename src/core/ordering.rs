//! Deterministic ordering of a query before it is sliced into pages

use crate::core::error::PagingError;
use crate::core::query::PageRequest;
use crate::core::record::Record;
use crate::core::sort::{ResolvedSortKey, SortableFieldSet, resolve, resolve_trusted};
use crate::core::store::Queryable;
use serde::{Deserialize, Serialize};

/// Well-known identity field used as the last-resort ordering
pub const DEFAULT_IDENTITY_FIELD: &str = "Id";

/// Per-record-type sorting policy supplied by the caller
///
/// The default field, when given, must be present on the record type and,
/// when a whitelist is supplied, inside it. [`SortOptions::validate`]
/// checks this up front; at request time a violation only degrades to the
/// identity ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// Field names callers may sort by; `None` admits every registered field
    pub whitelist: Option<SortableFieldSet>,

    /// Field used when the request does not name a usable one
    pub default_sort_by: Option<String>,

    /// Direction for `default_sort_by`
    pub default_descending: bool,

    /// Unique field ordering falls back to, and breaks ties with
    pub identity_field: String,

    /// Append the identity field as a secondary key after any other primary key
    pub tiebreak: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            whitelist: None,
            default_sort_by: None,
            default_descending: false,
            identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
            tiebreak: true,
        }
    }
}

impl SortOptions {
    /// Restrict dynamic sorting to `fields`
    pub fn with_whitelist<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            whitelist: Some(fields.into_iter().collect()),
            ..self
        }
    }

    /// Sort by `field` when the request names no usable column
    pub fn with_default(self, field: impl Into<String>, descending: bool) -> Self {
        Self {
            default_sort_by: Some(field.into()),
            default_descending: descending,
            ..self
        }
    }

    /// Use `field` as the identity fallback and tiebreaker
    pub fn with_identity(self, field: impl Into<String>) -> Self {
        Self {
            identity_field: field.into(),
            ..self
        }
    }

    pub fn with_tiebreak(self, tiebreak: bool) -> Self {
        Self { tiebreak, ..self }
    }

    /// Check the default-field precondition against record type `R`
    pub fn validate<R: Record>(&self) -> Result<(), PagingError> {
        let Some(default) = self.default_field() else {
            return Ok(());
        };

        if R::accessor(default, true).is_none() {
            return Err(PagingError::InvalidSortOptions {
                field: default.to_string(),
                reason: "not a sortable field of the record type".to_string(),
            });
        }

        if self
            .whitelist
            .as_ref()
            .is_some_and(|whitelist| !whitelist.contains(default))
        {
            return Err(PagingError::InvalidSortOptions {
                field: default.to_string(),
                reason: "not in the sort whitelist".to_string(),
            });
        }

        Ok(())
    }

    fn default_field(&self) -> Option<&str> {
        self.default_sort_by
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Choose the primary ordering for a request
///
/// Cascades from the requested column to the default field to the identity
/// field; each step is taken only when the previous one does not resolve.
pub fn primary_sort<R: Record>(
    request: &PageRequest,
    options: &SortOptions,
) -> Option<(ResolvedSortKey<R>, bool)> {
    let whitelist = options.whitelist.as_ref();

    let requested = request
        .requested_sort()
        .and_then(|requested| resolve::<R>(requested, whitelist));
    if let Some(key) = requested {
        return Some((key, request.descending));
    }

    if let Some(default) = options.default_field() {
        match resolve::<R>(default, whitelist) {
            Some(key) => return Some((key, options.default_descending)),
            None => tracing::warn!(
                field = %default,
                "default sort field is unknown or not whitelisted, falling back to identity"
            ),
        }
    }

    resolve_trusted::<R>(&options.identity_field).map(|key| (key, false))
}

/// Apply a deterministic ordering to `query`
///
/// When no field resolves at all (the record type has no identity field and
/// no usable default is given) the query is returned unordered.
pub fn apply_ordering<Q: Queryable>(query: Q, request: &PageRequest, options: &SortOptions) -> Q {
    let Some((primary, descending)) = primary_sort::<Q::Item>(request, options) else {
        tracing::warn!(
            identity = %options.identity_field,
            "no resolvable sort field, query left unordered"
        );
        return query;
    };

    tracing::debug!(
        field = primary.field_name(),
        descending,
        "ordering applied"
    );
    let query = query.order_by(primary, descending);

    if !options.tiebreak || primary.is_field(&options.identity_field) {
        return query;
    }

    match resolve_trusted::<Q::Item>(&options.identity_field) {
        Some(identity) => query.order_by(identity, false),
        None => query,
    }
}
