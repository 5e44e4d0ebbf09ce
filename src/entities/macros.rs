//! Macros for registering sortable record types
//!
//! These macros generate the static field table behind
//! [`Record`](crate::core::record::Record), so the comparator of every field
//! is monomorphised for its concrete type when the record is compiled.

/// Implement `Record` for an existing struct
///
/// Each entry maps a public (request-facing) field name to a struct field and
/// its type. The type must implement
/// [`SortValue`](crate::core::field::SortValue).
///
/// # Example
///
/// ```rust,ignore
/// use pagewise::prelude::*;
///
/// #[derive(Debug, Clone)]
/// pub struct Car {
///     pub id: i64,
///     pub name: String,
///     pub engine_power: i32,
/// }
///
/// impl_sortable_record!(Car, {
///     "Id" => id: i64,
///     "Name" => name: String,
///     "EnginePower" => engine_power: i32,
/// });
/// ```
#[macro_export]
macro_rules! impl_sortable_record {
    (
        $type:ty,
        {
            $( $public_name:literal => $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        impl $crate::core::record::Record for $type {
            fn fields() -> &'static [$crate::core::record::FieldDescriptor<Self>] {
                static FIELDS: &[$crate::core::record::FieldDescriptor<$type>] = &[
                    $(
                        $crate::core::record::FieldDescriptor::new(
                            $public_name,
                            <$field_type as $crate::core::field::SortValue>::VALUE_TYPE,
                            |a: &$type, b: &$type| {
                                <$field_type as $crate::core::field::SortValue>::compare(
                                    &a.$field,
                                    &b.$field,
                                )
                            },
                            |record: &$type| {
                                <$field_type as $crate::core::field::SortValue>::to_field_value(
                                    &record.$field,
                                )
                            },
                        ),
                    )*
                ];
                FIELDS
            }
        }
    };
}

/// Declare a record struct and register its fields in one go
///
/// Every declared field becomes sortable under its public name. The struct
/// derives `Debug`, `Clone`, `Serialize` and `Deserialize`.
///
/// # Example
///
/// ```rust,ignore
/// use pagewise::prelude::*;
///
/// sortable_record!(Car, {
///     "Id" => id: i64,
///     "Name" => name: String,
///     "EnginePower" => engine_power: i32,
/// });
///
/// let car = Car { id: 1, name: "Corolla".into(), engine_power: 132 };
/// ```
#[macro_export]
macro_rules! sortable_record {
    (
        $type:ident,
        {
            $( $public_name:literal => $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            $( pub $field : $field_type ),*
        }

        $crate::impl_sortable_record!($type, {
            $( $public_name => $field : $field_type ),*
        });
    };
}
