//! Record type metadata
//!
//! Each record type registers its sortable fields at compile time as a static
//! table of [`FieldDescriptor`]s (usually through
//! [`impl_sortable_record!`](crate::impl_sortable_record)). Looking a field up
//! by name is an ordinary table scan; nothing is introspected at runtime.

use crate::core::field::{FieldValue, ValueType};
use std::cmp::Ordering;
use std::fmt;

/// Compile-time metadata for one field of a record type `R`
pub struct FieldDescriptor<R> {
    name: &'static str,
    value_type: ValueType,
    compare: fn(&R, &R) -> Ordering,
    extract: fn(&R) -> FieldValue,
}

impl<R> FieldDescriptor<R> {
    /// Create a descriptor
    ///
    /// `compare` must be a total order over the field's typed value and
    /// `extract` must return a value tagged with `value_type` (or `Null`).
    pub const fn new(
        name: &'static str,
        value_type: ValueType,
        compare: fn(&R, &R) -> Ordering,
        extract: fn(&R) -> FieldValue,
    ) -> Self {
        Self {
            name,
            value_type,
            compare,
            extract,
        }
    }

    /// Public field name, as registered
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type tag of the field
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Compare two records on this field
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        (self.compare)(a, b)
    }

    /// Extract the field's value from a record
    pub fn value(&self, record: &R) -> FieldValue {
        (self.extract)(record)
    }

    /// Whether this descriptor answers to `name`
    pub fn matches(&self, name: &str, case_insensitive: bool) -> bool {
        if case_insensitive {
            fold_case(self.name) == fold_case(name)
        } else {
            self.name == name
        }
    }
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldDescriptor<R> {}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .finish()
    }
}

/// A record type whose fields can be sorted on by name
pub trait Record: Sized + Send + Sync + 'static {
    /// The static table of sortable fields
    fn fields() -> &'static [FieldDescriptor<Self>];

    /// Names and type tags of all sortable fields, in registration order
    fn list_fields() -> Vec<(&'static str, ValueType)> {
        Self::fields()
            .iter()
            .map(|field| (field.name(), field.value_type()))
            .collect()
    }

    /// Find the descriptor for `name`
    fn accessor(name: &str, case_insensitive: bool) -> Option<&'static FieldDescriptor<Self>> {
        Self::fields()
            .iter()
            .find(|field| field.matches(name, case_insensitive))
    }
}

/// Case folding shared by field lookup and whitelists
pub(crate) fn fold_case(name: &str) -> String {
    name.to_lowercase()
}
