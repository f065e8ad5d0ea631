//! Macro-generated test suite for `Repository<TestRecord>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use hbnb::storage::InMemoryRepository;
//!
//! repository_tests!(InMemoryRepository::<TestRecord>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_add_and_get`, `test_get_nonexistent`
//! - `test_get_all_empty`, `test_get_all_keeps_insertion_order`
//! - `test_update_existing`, `test_update_nonexistent`
//! - `test_delete_existing`, `test_delete_nonexistent`
//! - `test_add_duplicate_id`
//!
//! ## Attribute lookups
//! - string, integer, float, boolean and UUID fields
//! - text that happens to parse as a UUID still matches as written
//! - `get_by_attribute` returns the first match in insertion order
//! - non-matching values and unknown fields yield nothing
//!
//! ## Concurrency
//! - `test_concurrent_adds` from spawned tasks

/// Generate a full `Repository<TestRecord>` conformance test suite.
///
/// `$factory` is re-evaluated for each test; it may contain `.await`. For the
/// concurrency test the repository must also be `Clone + 'static`.
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use hbnb::core::Repository;
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_add_and_get() {
                let repo = $factory;
                let entity = record("Alice", 30, true);
                let id = entity.id;

                let added = repo.add(entity.clone()).await.unwrap();
                assert_eq!(added, entity);

                let fetched = repo.get(&id).await.unwrap();
                assert_eq!(fetched, Some(entity));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let repo = $factory;
                assert!(repo.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_get_all_empty() {
                let repo = $factory;
                assert!(repo.get_all().await.unwrap().is_empty());
                assert_eq!(repo.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_get_all_keeps_insertion_order() {
                let repo = $factory;
                for name in ["Charlie", "Alice", "Bob", "Eve", "Dave"] {
                    repo.add(record(name, 20, true)).await.unwrap();
                }

                let names: Vec<String> = repo
                    .get_all()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|r| r.name)
                    .collect();
                assert_eq!(names, vec!["Charlie", "Alice", "Bob", "Eve", "Dave"]);
                assert_eq!(repo.count().await.unwrap(), 5);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let repo = $factory;
                let mut entity = repo.add(record("Alice", 30, true)).await.unwrap();

                entity.name = "Alicia".to_string();
                entity.age = 31;
                entity.updated_at = chrono::Utc::now();
                let updated = repo.update(&entity.id, entity.clone()).await.unwrap();
                assert_eq!(updated.name, "Alicia");

                let fetched = repo.get(&entity.id).await.unwrap().unwrap();
                assert_eq!(fetched.name, "Alicia");
                assert_eq!(fetched.age, 31);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let repo = $factory;
                let entity = record("Ghost", 1, false);

                let err = repo.update(&entity.id, entity.clone()).await.unwrap_err();
                assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
                assert!(repo.get(&entity.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let repo = $factory;
                let keep = repo.add(record("Keep", 1, true)).await.unwrap();
                let drop = repo.add(record("Drop", 2, true)).await.unwrap();

                assert!(repo.delete(&drop.id).await.unwrap());
                assert!(repo.get(&drop.id).await.unwrap().is_none());
                assert!(repo.get(&keep.id).await.unwrap().is_some());
                assert_eq!(repo.count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let repo = $factory;
                assert!(!repo.delete(&Uuid::new_v4()).await.unwrap());
            }

            #[tokio::test]
            async fn test_add_duplicate_id() {
                let repo = $factory;
                let entity = repo.add(record("Alice", 30, true)).await.unwrap();

                let mut clash = record("Mallory", 40, false);
                clash.id = entity.id;
                assert!(repo.add(clash).await.is_err());

                let fetched = repo.get(&entity.id).await.unwrap().unwrap();
                assert_eq!(fetched.name, "Alice");
            }

            // ==================================================================
            // Attribute lookups
            // ==================================================================

            #[tokio::test]
            async fn test_find_by_string_field() {
                let repo = $factory;
                repo.add(record("Alice", 30, true)).await.unwrap();
                repo.add(record("Bob", 25, true)).await.unwrap();

                let found = repo.find_by_attribute("name", "Bob").await.unwrap();
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].name, "Bob");
            }

            #[tokio::test]
            async fn test_find_by_integer_field() {
                let repo = $factory;
                repo.add(record("Alice", 30, true)).await.unwrap();
                repo.add(record("Bob", 25, true)).await.unwrap();
                repo.add(record("Carol", 30, false)).await.unwrap();

                let found = repo.find_by_attribute("age", "30").await.unwrap();
                let names: Vec<_> = found.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["Alice", "Carol"]);
            }

            #[tokio::test]
            async fn test_find_by_boolean_field() {
                let repo = $factory;
                repo.add(record("Alice", 30, true)).await.unwrap();
                repo.add(record("Bob", 25, false)).await.unwrap();

                let inactive = repo.find_by_attribute("active", "false").await.unwrap();
                assert_eq!(inactive.len(), 1);
                assert_eq!(inactive[0].name, "Bob");
            }

            #[tokio::test]
            async fn test_find_by_uuid_field() {
                let repo = $factory;
                let group = Uuid::new_v4();
                repo.add(record_in("Alice", 30, true, group)).await.unwrap();
                repo.add(record("Bob", 25, true)).await.unwrap();
                repo.add(record_in("Carol", 41, true, group)).await.unwrap();

                let found = repo
                    .find_by_attribute("group_id", &group.to_string())
                    .await
                    .unwrap();
                assert_eq!(found.len(), 2);

                // UUID matching ignores case
                let upper = group.to_string().to_uppercase();
                let found = repo.find_by_attribute("group_id", &upper).await.unwrap();
                assert_eq!(found.len(), 2);
            }

            #[tokio::test]
            async fn test_find_by_float_field() {
                let repo = $factory;
                let mut high = record("High", 30, true);
                high.score = 250.0;
                let mut odd = record("Odd", 30, true);
                odd.score = 4.75;
                repo.add(high).await.unwrap();
                repo.add(odd).await.unwrap();

                for query in ["250", "250.0", "2.5e2"] {
                    let found = repo.find_by_attribute("score", query).await.unwrap();
                    assert_eq!(found.len(), 1, "query {}", query);
                    assert_eq!(found[0].name, "High");
                }
                let found = repo.find_by_attribute("score", "4.75").await.unwrap();
                assert_eq!(found[0].name, "Odd");
                assert!(repo.find_by_attribute("score", "250.5").await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_uuid_shaped_text_as_written() {
                let repo = $factory;
                let simple = "ABCDEF0123456789ABCDEF0123456789";
                repo.add(record(simple, 1, true)).await.unwrap();

                let found = repo.find_by_attribute("name", simple).await.unwrap();
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].name, simple);

                // a different spelling of the same UUID is a different string
                let hyphenated = Uuid::parse_str(simple).unwrap().to_string();
                assert!(repo.find_by_attribute("name", &hyphenated).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_get_by_attribute_returns_first() {
                let repo = $factory;
                repo.add(record("Twin", 1, true)).await.unwrap();
                repo.add(record("Twin", 2, true)).await.unwrap();

                let first = repo.get_by_attribute("name", "Twin").await.unwrap().unwrap();
                assert_eq!(first.age, 1);
            }

            #[tokio::test]
            async fn test_find_no_results() {
                let repo = $factory;
                repo.add(record("Alice", 30, true)).await.unwrap();

                assert!(repo.find_by_attribute("name", "Zed").await.unwrap().is_empty());
                assert!(repo.get_by_attribute("name", "Zed").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_find_unknown_field() {
                let repo = $factory;
                repo.add(record("Alice", 30, true)).await.unwrap();

                let found = repo.find_by_attribute("nickname", "Alice").await.unwrap();
                assert!(found.is_empty());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_adds() {
                let repo = $factory;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let repo = repo.clone();
                    handles.push(tokio::spawn(async move {
                        repo.add(record(&format!("worker{}", i), i, true)).await
                    }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_eq!(repo.count().await.unwrap(), 10);
            }
        }
    };
}
