//! Macro-generated test suite for paging over any `Queryable<Item = TestVehicle>`.
//!
//! The `paging_tests!` macro generates a test module that runs the paging
//! engine end to end against a backend: both fetch strategies on the
//! 23-row dataset, ordering stability, sort fallbacks, whitelist handling,
//! filtering and projection.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use pagewise::prelude::*;
//! use storage_harness::*;
//!
//! fn in_memory_query(rows: Vec<TestVehicle>) -> InMemoryQuery<TestVehicle> {
//!     InMemoryStore::from_rows(rows).query().unwrap()
//! }
//!
//! paging_tests!(in_memory_query);
//! ```
//!
//! # Generated Tests
//!
//! ## Exact count
//! - `test_exact_count_pages`: 23 rows, size 10: 10/10/3 items, 3 pages, navigation flags
//! - `test_exact_count_beyond_last_page`: empty items, counts still reported
//!
//! ## Over-fetch probe
//! - `test_probe_pages`: page 2 probes a next page, page 3 does not, totals absent
//! - `test_probe_beyond_last_page`: empty items, probe false
//!
//! ## Ordering
//! - `test_default_identity_order`: no sort: identity ascending, not storage order
//! - `test_pages_never_overlap`: duplicated sort values, both strategies
//! - `test_repeated_request_is_deterministic`
//! - `test_case_insensitive_sort_column`
//! - `test_descending_sort`
//! - `test_optional_field_sorts_absent_first`
//! - `test_forbidden_column_is_ignored` / `test_unknown_column_is_ignored`
//! - `test_forbidden_column_falls_back_to_default`
//!
//! ## Shape
//! - `test_search_filter_counts_filtered_rows`
//! - `test_projection`
//! - `test_malformed_paging_input_is_clamped`
//! - `test_concurrent_count_matches_sequential`

#![allow(unused_macros)]

/// Generate the paging conformance suite.
///
/// `$factory` must name a function `fn(Vec<TestVehicle>) -> Q` where
/// `Q: Queryable<Item = TestVehicle>`. It is called once per query so every
/// test starts from the standard dataset. The invoking module must import
/// `pagewise::prelude::*` and the harness items.
macro_rules! paging_tests {
    ($factory:path) => {
        mod paging_contract_tests {
            use super::*;

            fn query() -> impl Queryable<Item = TestVehicle> {
                $factory(vehicles())
            }

            // ==================================================================
            // Exact-count strategy
            // ==================================================================

            #[tokio::test]
            async fn test_exact_count_pages() {
                let sort = whitelisted_sort();
                let mut seen = Vec::new();

                for (page_number, expected_len) in [(1, 10), (2, 10), (3, 3)] {
                    let page = fetch(query(), &PageRequest::new(page_number, 10), &sort).await;

                    assert_eq!(page.items.len(), expected_len);
                    assert_eq!(page.meta.page_number, page_number as u64);
                    assert_eq!(page.meta.page_size, 10);
                    assert_eq!(page.meta.total_count, Some(23));
                    assert_eq!(page.meta.total_pages, Some(3));
                    assert_eq!(page.meta.has_previous, page_number > 1);
                    assert_eq!(page.meta.has_next, Some(page_number < 3));
                    assert_eq!(page.meta.has_next_probe, None);

                    seen.extend(ids(&page.items));
                }

                assert_eq!(seen, (1..=23).collect::<Vec<_>>());
            }

            #[tokio::test]
            async fn test_exact_count_beyond_last_page() {
                let page = fetch(query(), &PageRequest::new(5, 10), &whitelisted_sort()).await;

                assert!(page.items.is_empty());
                assert_eq!(page.meta.total_count, Some(23));
                assert_eq!(page.meta.total_pages, Some(3));
                assert_eq!(page.meta.has_next, Some(false));
                assert!(page.meta.has_previous);
            }

            // ==================================================================
            // Over-fetch probe strategy
            // ==================================================================

            #[tokio::test]
            async fn test_probe_pages() {
                let sort = whitelisted_sort();

                let second = fetch(
                    query(),
                    &PageRequest::new(2, 10).with_total_count(false),
                    &sort,
                )
                .await;
                assert_eq!(ids(&second.items), (11..=20).collect::<Vec<_>>());
                assert_eq!(second.meta.has_next_probe, Some(true));
                assert_eq!(second.meta.total_count, None);
                assert_eq!(second.meta.total_pages, None);
                assert_eq!(second.meta.has_next, None);
                assert!(second.meta.has_previous);

                let third = fetch(
                    query(),
                    &PageRequest::new(3, 10).with_total_count(false),
                    &sort,
                )
                .await;
                assert_eq!(ids(&third.items), vec![21, 22, 23]);
                assert_eq!(third.meta.has_next_probe, Some(false));
                assert_eq!(third.meta.total_count, None);
                assert_eq!(third.meta.total_pages, None);
                assert_eq!(third.meta.has_next, None);
            }

            #[tokio::test]
            async fn test_probe_beyond_last_page() {
                let page = fetch(
                    query(),
                    &PageRequest::new(4, 10).with_total_count(false),
                    &whitelisted_sort(),
                )
                .await;

                assert!(page.items.is_empty());
                assert_eq!(page.meta.has_next_probe, Some(false));
            }

            // ==================================================================
            // Ordering
            // ==================================================================

            #[tokio::test]
            async fn test_default_identity_order() {
                let page = fetch(query(), &PageRequest::new(1, 23), &SortOptions::default()).await;
                assert_eq!(ids(&page.items), (1..=23).collect::<Vec<_>>());
            }

            #[tokio::test]
            async fn test_pages_never_overlap() {
                for include_total_count in [true, false] {
                    let mut seen = Vec::new();

                    for page_number in 1..=3 {
                        let request = PageRequest::new(page_number, 10)
                            .sort_by("EnginePower")
                            .descending(true)
                            .with_total_count(include_total_count);
                        let page = fetch(query(), &request, &whitelisted_sort()).await;
                        seen.extend(ids(&page.items));
                    }

                    assert_eq!(seen.len(), 23);
                    assert_no_duplicates(&seen);
                    assert_eq!(
                        seen,
                        expected_ids(|a, b| b
                            .engine_power
                            .cmp(&a.engine_power)
                            .then(a.id.cmp(&b.id)))
                    );
                }
            }

            #[tokio::test]
            async fn test_repeated_request_is_deterministic() {
                let request = PageRequest::new(2, 7).sort_by("RegisteredAt");

                let first = fetch(query(), &request, &whitelisted_sort()).await;
                let second = fetch(query(), &request, &whitelisted_sort()).await;

                assert_eq!(ids(&first.items), ids(&second.items));
                assert_eq!(first.meta, second.meta);
            }

            #[tokio::test]
            async fn test_case_insensitive_sort_column() {
                let page = fetch(
                    query(),
                    &PageRequest::new(1, 23).sort_by("name"),
                    &whitelisted_sort(),
                )
                .await;

                assert_eq!(ids(&page.items), expected_ids(|a, b| a.name.cmp(&b.name)));
            }

            #[tokio::test]
            async fn test_descending_sort() {
                let page = fetch(
                    query(),
                    &PageRequest::new(1, 5).sort_by("NAME").descending(true),
                    &whitelisted_sort(),
                )
                .await;

                let expected = expected_ids(|a, b| b.name.cmp(&a.name));
                assert_eq!(ids(&page.items), expected[..5].to_vec());
            }

            #[tokio::test]
            async fn test_optional_field_sorts_absent_first() {
                let page = fetch(
                    query(),
                    &PageRequest::new(1, 23).sort_by("nickname"),
                    &whitelisted_sort(),
                )
                .await;

                let odd: Vec<i64> = (1..=23).filter(|id| id % 2 == 1).collect();
                let even: Vec<i64> = (1..=23).filter(|id| id % 2 == 0).collect();
                assert_eq!(ids(&page.items)[..12], odd[..]);
                assert_eq!(ids(&page.items)[12..], even[..]);
            }

            #[tokio::test]
            async fn test_forbidden_column_is_ignored() {
                let page = fetch(
                    query(),
                    &PageRequest::new(1, 23).sort_by("InternalCost").descending(true),
                    &whitelisted_sort(),
                )
                .await;

                assert_eq!(ids(&page.items), (1..=23).collect::<Vec<_>>());
            }

            #[tokio::test]
            async fn test_unknown_column_is_ignored() {
                let page = fetch(
                    query(),
                    &PageRequest::new(1, 23).sort_by("Color").descending(true),
                    &SortOptions::default(),
                )
                .await;

                assert_eq!(page.items.len(), 23);
                assert_eq!(ids(&page.items), (1..=23).collect::<Vec<_>>());
            }

            #[tokio::test]
            async fn test_forbidden_column_falls_back_to_default() {
                let sort = whitelisted_sort().with_default("Name", true);
                let page = fetch(
                    query(),
                    &PageRequest::new(1, 23).sort_by("InternalCost"),
                    &sort,
                )
                .await;

                assert_eq!(ids(&page.items), expected_ids(|a, b| b.name.cmp(&a.name)));
            }

            // ==================================================================
            // Filtering, projection, normalization
            // ==================================================================

            #[tokio::test]
            async fn test_search_filter_counts_filtered_rows() {
                let filtered = query().filter(Predicate::contains("Name", "toyota"));
                let page = fetch(filtered, &PageRequest::new(1, 3), &whitelisted_sort()).await;

                let toyotas = vehicles()
                    .iter()
                    .filter(|vehicle| vehicle.name.starts_with("Toyota"))
                    .count() as u64;

                assert_eq!(page.meta.total_count, Some(toyotas));
                assert_eq!(page.meta.total_pages, Some(toyotas.div_ceil(3)));
                assert_eq!(page.items.len(), 3);
                assert!(page.items.iter().all(|vehicle| vehicle.name.starts_with("Toyota")));
            }

            #[tokio::test]
            async fn test_projection() {
                let page = paginate_projected(
                    query(),
                    &PageRequest::new(1, 3).sort_by("Id").descending(true),
                    &PaginationOptions::default(),
                    &whitelisted_sort(),
                    &|vehicle: TestVehicle| vehicle.name,
                    &CancellationToken::new(),
                )
                .await
                .unwrap();

                assert_eq!(page.items, vec!["Volvo 23", "Ford 22", "Honda 21"]);
                assert_eq!(page.meta.total_pages, Some(8));
            }

            #[tokio::test]
            async fn test_malformed_paging_input_is_clamped() {
                let tiny = fetch(query(), &PageRequest::new(0, 0), &whitelisted_sort()).await;
                assert_eq!(tiny.meta.page_number, 1);
                assert_eq!(tiny.meta.page_size, 1);
                assert_eq!(ids(&tiny.items), vec![1]);
                assert_eq!(tiny.meta.total_pages, Some(23));

                let huge = fetch(query(), &PageRequest::new(-3, 10_000), &whitelisted_sort()).await;
                assert_eq!(huge.meta.page_size, 100);
                assert_eq!(huge.items.len(), 23);
                assert_eq!(huge.meta.has_next, Some(false));
            }

            #[tokio::test]
            async fn test_concurrent_count_matches_sequential() {
                let request = PageRequest::new(2, 10).sort_by("Name");
                let concurrent = PaginationOptions {
                    concurrent_count: true,
                    ..PaginationOptions::default()
                };

                let a = paginate(
                    query(),
                    &request,
                    &concurrent,
                    &whitelisted_sort(),
                    &CancellationToken::new(),
                )
                .await
                .unwrap();
                let b = fetch(query(), &request, &whitelisted_sort()).await;

                assert_eq!(a, b);
            }
        }
    };
}
