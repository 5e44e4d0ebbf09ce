//! Shared test harness for queryable backend testing
//!
//! Provides `TestVehicle`, a record registering fields of every sortable
//! kind, a fixed 23-row dataset stored out of identity order, and helpers
//! for running pages against any `Queryable<Item = TestVehicle>`.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! paging_tests!(my_backend_query);
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod paging_tests;

use chrono::{DateTime, Duration, TimeZone, Utc};
use pagewise::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TestVehicle: one field per sortable value kind
// ---------------------------------------------------------------------------

/// Number of rows in the standard dataset
pub const VEHICLE_COUNT: usize = 23;

/// Makes cycled through by `vehicles()`, indexed by `id % 4`
pub const MAKES: [&str; 4] = ["Toyota", "Honda", "Ford", "Volvo"];

/// A test record with fields spanning the `SortValue` kinds.
///
/// Fields:
/// - `id`: i64 identity (1..=23)
/// - `name`: String, unique ("Toyota 04", "Honda 05", ...)
/// - `engine_power`: i32 with heavy duplication (5 distinct values)
/// - `price`: f64
/// - `registered_at`: DateTime
/// - `nickname`: Option<String>, present on even ids only
/// - `internal_cost`: i64, registered but never whitelisted
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestVehicle {
    pub id: i64,
    pub name: String,
    pub engine_power: i32,
    pub price: f64,
    pub registered_at: DateTime<Utc>,
    pub nickname: Option<String>,
    pub internal_cost: i64,
}

impl_sortable_record!(TestVehicle, {
    "Id" => id: i64,
    "Name" => name: String,
    "EnginePower" => engine_power: i32,
    "Price" => price: f64,
    "RegisteredAt" => registered_at: DateTime<Utc>,
    "Nickname" => nickname: Option<String>,
    "InternalCost" => internal_cost: i64,
});

/// Build a vehicle deterministically from its id
pub fn vehicle(id: i64) -> TestVehicle {
    let make = MAKES[(id % 4) as usize];
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    TestVehicle {
        id,
        name: format!("{make} {id:02}"),
        engine_power: 100 + (id % 5) as i32 * 10,
        price: 15_000.0 + (id * 37 % 11) as f64 * 1_250.5,
        registered_at: base + Duration::days(id * 3 % 17),
        nickname: (id % 2 == 0).then(|| format!("nick-{id:02}")),
        internal_cost: 1_000 - id,
    }
}

/// The standard dataset: ids 1..=23 stored in a scrambled order
///
/// Storage order deliberately differs from identity order so that tests
/// observe the ordering the engine applies, not the insertion order.
pub fn vehicles() -> Vec<TestVehicle> {
    (0..VEHICLE_COUNT as i64)
        .map(|i| vehicle(i * 7 % VEHICLE_COUNT as i64 + 1))
        .collect()
}

/// Sorting policy used by most tests
pub fn whitelisted_sort() -> SortOptions {
    SortOptions::default().with_whitelist(["Name", "EnginePower", "Id", "RegisteredAt", "Nickname"])
}

/// Ids of a page, in page order
pub fn ids(items: &[TestVehicle]) -> Vec<i64> {
    items.iter().map(|vehicle| vehicle.id).collect()
}

/// Run one request with default pagination bounds and no cancellation
pub async fn fetch<Q>(
    query: Q,
    request: &PageRequest,
    sort: &SortOptions,
) -> PaginatedResult<TestVehicle>
where
    Q: Queryable<Item = TestVehicle>,
{
    paginate(
        query,
        request,
        &PaginationOptions::default(),
        sort,
        &CancellationToken::new(),
    )
    .await
    .expect("paging should succeed")
}

/// The dataset sorted with a comparator, ids only
pub fn expected_ids(mut compare: impl FnMut(&TestVehicle, &TestVehicle) -> std::cmp::Ordering) -> Vec<i64> {
    let mut rows = vehicles();
    rows.sort_by(|a, b| compare(a, b));
    ids(&rows)
}

pub fn assert_no_duplicates(ids: &[i64]) {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        assert!(seen.insert(*id), "id {} returned more than once", id);
    }
}
