//! Field value types and typed sort values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// This is the untyped view of a record field. Ordering never goes through
/// it; comparisons use the typed [`SortValue`] implementation of the field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The type tag of this value, `None` for [`FieldValue::Null`]
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            FieldValue::String(_) => Some(ValueType::String),
            FieldValue::Integer(_) => Some(ValueType::Integer),
            FieldValue::Float(_) => Some(ValueType::Float),
            FieldValue::Boolean(_) => Some(ValueType::Boolean),
            FieldValue::Uuid(_) => Some(ValueType::Uuid),
            FieldValue::DateTime(_) => Some(ValueType::DateTime),
            FieldValue::Null => None,
        }
    }

    /// Case-insensitive substring test, only meaningful for string values
    ///
    /// Mirrors `LIKE '%needle%'` under a case-insensitive collation.
    pub fn contains_text(&self, needle: &str) -> bool {
        match self {
            FieldValue::String(s) => s.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

/// Type tag attached to a sortable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
    Uuid,
    DateTime,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Uuid => "uuid",
            ValueType::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// A field type that can drive an ordering
///
/// Implementations compare values of their own concrete type, so a field
/// registered as `i32` is ordered numerically and a `String` field
/// lexicographically, never through an untyped intermediate.
pub trait SortValue: Send + Sync + 'static {
    /// Tag reported through record metadata
    const VALUE_TYPE: ValueType;

    /// Total order between two values of this type
    fn compare(&self, other: &Self) -> Ordering;

    /// Untyped view of the value, used for filtering and introspection
    fn to_field_value(&self) -> FieldValue;
}

macro_rules! impl_sort_value_ord {
    ($ty:ty, $tag:ident, |$v:ident| $convert:expr) => {
        impl SortValue for $ty {
            const VALUE_TYPE: ValueType = ValueType::$tag;

            fn compare(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }

            fn to_field_value(&self) -> FieldValue {
                let $v = self;
                $convert
            }
        }
    };
}

impl_sort_value_ord!(String, String, |v| FieldValue::String(v.clone()));
impl_sort_value_ord!(i32, Integer, |v| FieldValue::Integer(i64::from(*v)));
impl_sort_value_ord!(i64, Integer, |v| FieldValue::Integer(*v));
impl_sort_value_ord!(u32, Integer, |v| FieldValue::Integer(i64::from(*v)));
impl_sort_value_ord!(u64, Integer, |v| FieldValue::Integer(
    i64::try_from(*v).unwrap_or(i64::MAX)
));
impl_sort_value_ord!(bool, Boolean, |v| FieldValue::Boolean(*v));
impl_sort_value_ord!(Uuid, Uuid, |v| FieldValue::Uuid(*v));
impl_sort_value_ord!(DateTime<Utc>, DateTime, |v| FieldValue::DateTime(*v));

impl SortValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl SortValue for f32 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

/// Absent values sort before present ones
impl<V: SortValue> SortValue for Option<V> {
    const VALUE_TYPE: ValueType = V::VALUE_TYPE;

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Some(a), Some(b)) => a.compare(b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    fn to_field_value(&self) -> FieldValue {
        self.as_ref()
            .map_or(FieldValue::Null, SortValue::to_field_value)
    }
}
