//! Macro-generated test suite for the HbnbFacade business rules.
//!
//! # Generated Tests
//!
//! - `user_tests`: email uniqueness, lookups, updates, login, delete cascade
//! - `amenity_tests`: name uniqueness, attaching to places, detach on delete
//! - `place_tests`: owner checks, validation, updates, review cascade
//! - `review_tests`: self review, second review, missing place or user

/// Generate the facade business-rule suite.
///
/// `$factory` must evaluate to an empty `HbnbFacade`; it is re-evaluated for
/// each test and may contain `.await`.
#[macro_export]
macro_rules! facade_tests {
    ($factory:expr) => {
        mod facade_rule_tests {
            use super::*;
            use axum::http::StatusCode;

            async fn facade() -> HbnbFacade {
                $factory
            }

            async fn world() -> World {
                world_on(facade().await).await
            }

            // =============================================================================
            // Users
            // =============================================================================

            mod user_tests {
                use super::*;

                #[tokio::test]
                async fn test_duplicate_email_rejected() {
                    let w = world().await;
                    let err = w
                        .facade
                        .create_user(new_user("Other", "owner@example.com"))
                        .await
                        .unwrap_err();

                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                    assert!(matches!(
                        err,
                        HbnbError::Entity(EntityError::Duplicate { ref field, .. }) if field == "email"
                    ));
                }

                #[tokio::test]
                async fn test_invalid_user_rejected_before_storage() {
                    let facade = facade().await;
                    let err = facade
                        .create_user(new_user("J0hn", "john@example.com"))
                        .await
                        .unwrap_err();

                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                    assert!(!facade.has_users().await.unwrap());
                }

                #[tokio::test]
                async fn test_get_user_by_email() {
                    let w = world().await;
                    let found = w
                        .facade
                        .get_user_by_email("guest@example.com")
                        .await
                        .unwrap()
                        .expect("guest should be found");
                    assert_eq!(found.id, w.guest.id);

                    assert!(
                        w.facade
                            .get_user_by_email("nobody@example.com")
                            .await
                            .unwrap()
                            .is_none()
                    );

                    let err = w.facade.get_user_by_email("").await.unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                }

                #[tokio::test]
                async fn test_update_email_to_taken_address_rejected() {
                    let w = world().await;
                    let err = w
                        .facade
                        .update_user(
                            &w.guest.id,
                            UserUpdate {
                                email: Some("owner@example.com".to_string()),
                                ..Default::default()
                            },
                        )
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                }

                #[tokio::test]
                async fn test_update_keeping_own_email_allowed() {
                    let w = world().await;
                    let updated = w
                        .facade
                        .update_user(
                            &w.guest.id,
                            UserUpdate {
                                email: Some("guest@example.com".to_string()),
                                first_name: Some("Visitor".to_string()),
                                ..Default::default()
                            },
                        )
                        .await
                        .unwrap();
                    assert_eq!(updated.first_name, "Visitor");
                }

                #[tokio::test]
                async fn test_update_unknown_user_is_404() {
                    let facade = facade().await;
                    let err = facade
                        .update_user(&Uuid::new_v4(), UserUpdate::default())
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
                }

                #[tokio::test]
                async fn test_authenticate() {
                    let w = world().await;
                    let user = w
                        .facade
                        .authenticate("guest@example.com", "password")
                        .await
                        .unwrap();
                    assert_eq!(user.id, w.guest.id);

                    let wrong_password = w
                        .facade
                        .authenticate("guest@example.com", "nope")
                        .await
                        .unwrap_err();
                    let unknown_email = w
                        .facade
                        .authenticate("ghost@example.com", "password")
                        .await
                        .unwrap_err();

                    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
                    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
                }

                #[tokio::test]
                async fn test_delete_user_cascades() {
                    let w = world().await;
                    let guest_place = w
                        .facade
                        .create_place(new_place("Cabin", w.guest.id))
                        .await
                        .unwrap();
                    // owner reviews the guest's place, guest reviews the owner's place
                    let review_on_guest_place = w
                        .facade
                        .create_review(new_review(guest_place.id, w.owner.id, 4))
                        .await
                        .unwrap();
                    let review_by_guest = w
                        .facade
                        .create_review(new_review(w.place.id, w.guest.id, 5))
                        .await
                        .unwrap();

                    w.facade.delete_user(&w.guest.id).await.unwrap();

                    assert!(w.facade.get_user(&w.guest.id).await.is_err());
                    assert!(w.facade.get_place(&guest_place.id).await.is_err());
                    assert!(w.facade.get_review(&review_on_guest_place.id).await.is_err());
                    assert!(w.facade.get_review(&review_by_guest.id).await.is_err());
                    // the owner and their place are untouched
                    assert!(w.facade.get_place(&w.place.id).await.is_ok());
                    assert_eq!(w.facade.get_all_users().await.unwrap().len(), 1);
                }
            }

            // =============================================================================
            // Amenities
            // =============================================================================

            mod amenity_tests {
                use super::*;

                fn amenity(name: &str) -> NewAmenity {
                    NewAmenity {
                        name: name.to_string(),
                    }
                }

                #[tokio::test]
                async fn test_duplicate_name_rejected() {
                    let facade = facade().await;
                    facade.create_amenity(amenity("Wi-Fi")).await.unwrap();
                    let err = facade.create_amenity(amenity("Wi-Fi")).await.unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                }

                #[tokio::test]
                async fn test_uuid_shaped_name_is_unique() {
                    let facade = facade().await;
                    let name = "ABCDEF0123456789ABCDEF0123456789";
                    facade.create_amenity(amenity(name)).await.unwrap();

                    let err = facade.create_amenity(amenity(name)).await.unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                    assert_eq!(facade.get_all_amenities().await.unwrap().len(), 1);
                }

                #[tokio::test]
                async fn test_attach_amenity_with_uuid_shaped_name() {
                    let w = world().await;
                    let name = "ABCDEF0123456789ABCDEF0123456789";
                    let amenity = w.facade.create_amenity(amenity(name)).await.unwrap();

                    let place = w
                        .facade
                        .add_amenity_to_place(&w.place.id, name)
                        .await
                        .unwrap();
                    assert_eq!(place.amenity_ids, vec![amenity.id]);
                }

                #[tokio::test]
                async fn test_rename_to_existing_name_rejected() {
                    let facade = facade().await;
                    facade.create_amenity(amenity("Wi-Fi")).await.unwrap();
                    let pool = facade.create_amenity(amenity("Pool")).await.unwrap();

                    let err = facade
                        .update_amenity(
                            &pool.id,
                            AmenityUpdate {
                                name: Some("Wi-Fi".to_string()),
                            },
                        )
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

                    let renamed = facade
                        .update_amenity(
                            &pool.id,
                            AmenityUpdate {
                                name: Some("Pool".to_string()),
                            },
                        )
                        .await
                        .unwrap();
                    assert_eq!(renamed.name, "Pool");
                }

                #[tokio::test]
                async fn test_add_amenity_to_place() {
                    let w = world().await;
                    let wifi = w.facade.create_amenity(amenity("Wi-Fi")).await.unwrap();

                    let place = w
                        .facade
                        .add_amenity_to_place(&w.place.id, "Wi-Fi")
                        .await
                        .unwrap();
                    assert_eq!(place.amenity_ids, vec![wifi.id]);

                    let again = w
                        .facade
                        .add_amenity_to_place(&w.place.id, "Wi-Fi")
                        .await
                        .unwrap_err();
                    assert_eq!(again.status_code(), StatusCode::BAD_REQUEST);

                    let missing = w
                        .facade
                        .add_amenity_to_place(&w.place.id, "Sauna")
                        .await
                        .unwrap_err();
                    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

                    let no_place = w
                        .facade
                        .add_amenity_to_place(&Uuid::new_v4(), "Wi-Fi")
                        .await
                        .unwrap_err();
                    assert_eq!(no_place.status_code(), StatusCode::NOT_FOUND);

                    let amenities = w.facade.get_place_amenities(&w.place.id).await.unwrap();
                    assert_eq!(amenities.len(), 1);
                    assert_eq!(amenities[0].name, "Wi-Fi");
                }

                #[tokio::test]
                async fn test_delete_amenity_detaches_it() {
                    let w = world().await;
                    let wifi = w.facade.create_amenity(amenity("Wi-Fi")).await.unwrap();
                    w.facade.create_amenity(amenity("Pool")).await.unwrap();
                    w.facade
                        .add_amenity_to_place(&w.place.id, "Wi-Fi")
                        .await
                        .unwrap();
                    w.facade
                        .add_amenity_to_place(&w.place.id, "Pool")
                        .await
                        .unwrap();

                    w.facade.delete_amenity(&wifi.id).await.unwrap();

                    let place = w.facade.get_place(&w.place.id).await.unwrap();
                    assert_eq!(place.amenity_ids.len(), 1);
                    assert!(!place.amenity_ids.contains(&wifi.id));
                    assert!(w.facade.get_amenity(&wifi.id).await.is_err());
                }
            }

            // =============================================================================
            // Places
            // =============================================================================

            mod place_tests {
                use super::*;

                #[tokio::test]
                async fn test_owner_must_exist() {
                    let facade = facade().await;
                    let err = facade
                        .create_place(new_place("Nowhere", Uuid::new_v4()))
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                }

                #[tokio::test]
                async fn test_owner_required() {
                    let w = world().await;
                    let mut input = new_place("Orphan", w.owner.id);
                    input.owner_id = None;
                    let err = w.facade.create_place(input).await.unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                }

                #[tokio::test]
                async fn test_out_of_range_coordinates_rejected() {
                    let w = world().await;
                    let mut input = new_place("Pole", w.owner.id);
                    input.latitude = 91.0;
                    let err = w.facade.create_place(input).await.unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                    assert_eq!(w.facade.get_all_places().await.unwrap().len(), 1);
                }

                #[tokio::test]
                async fn test_update_place() {
                    let w = world().await;
                    let updated = w
                        .facade
                        .update_place(
                            &w.place.id,
                            PlaceUpdate {
                                price: Some(120.0),
                                ..Default::default()
                            },
                        )
                        .await
                        .unwrap();
                    assert_eq!(updated.price, 120.0);
                    assert_eq!(updated.owner_id, w.owner.id);

                    let err = w
                        .facade
                        .update_place(
                            &w.place.id,
                            PlaceUpdate {
                                price: Some(-5.0),
                                ..Default::default()
                            },
                        )
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                }

                #[tokio::test]
                async fn test_get_place_owner() {
                    let w = world().await;
                    let owner = w.facade.get_place_owner(&w.place).await.unwrap();
                    assert_eq!(owner.id, w.owner.id);
                }

                #[tokio::test]
                async fn test_delete_place_removes_reviews() {
                    let w = world().await;
                    let review = w
                        .facade
                        .create_review(new_review(w.place.id, w.guest.id, 3))
                        .await
                        .unwrap();

                    w.facade.delete_place(&w.place.id).await.unwrap();

                    assert!(w.facade.get_review(&review.id).await.is_err());
                    assert!(w.facade.get_all_reviews().await.unwrap().is_empty());
                }
            }

            // =============================================================================
            // Reviews
            // =============================================================================

            mod review_tests {
                use super::*;

                #[tokio::test]
                async fn test_create_and_list_by_place() {
                    let w = world().await;
                    let review = w
                        .facade
                        .create_review(new_review(w.place.id, w.guest.id, 5))
                        .await
                        .unwrap();

                    let reviews = w.facade.get_reviews_by_place(&w.place.id).await.unwrap();
                    assert_eq!(reviews.len(), 1);
                    assert_eq!(reviews[0].id, review.id);

                    let by_pair = w
                        .facade
                        .get_review_by_place_and_user(&w.place.id, &w.guest.id)
                        .await
                        .unwrap();
                    assert_eq!(by_pair.map(|r| r.id), Some(review.id));
                }

                #[tokio::test]
                async fn test_cannot_review_own_place() {
                    let w = world().await;
                    let err = w
                        .facade
                        .create_review(new_review(w.place.id, w.owner.id, 5))
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                    assert_eq!(err.to_string(), "You cannot review your own place");
                }

                #[tokio::test]
                async fn test_second_review_rejected() {
                    let w = world().await;
                    w.facade
                        .create_review(new_review(w.place.id, w.guest.id, 5))
                        .await
                        .unwrap();
                    let err = w
                        .facade
                        .create_review(new_review(w.place.id, w.guest.id, 1))
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                    assert_eq!(err.to_string(), "You have already reviewed this place");
                }

                #[tokio::test]
                async fn test_missing_place_is_404_missing_user_is_400() {
                    let w = world().await;
                    let no_place = w
                        .facade
                        .create_review(new_review(Uuid::new_v4(), w.guest.id, 4))
                        .await
                        .unwrap_err();
                    assert_eq!(no_place.status_code(), StatusCode::NOT_FOUND);

                    let no_user = w
                        .facade
                        .create_review(new_review(w.place.id, Uuid::new_v4(), 4))
                        .await
                        .unwrap_err();
                    assert_eq!(no_user.status_code(), StatusCode::BAD_REQUEST);
                }

                #[tokio::test]
                async fn test_rating_out_of_range() {
                    let w = world().await;
                    let err = w
                        .facade
                        .create_review(new_review(w.place.id, w.guest.id, 6))
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
                }

                #[tokio::test]
                async fn test_reviews_of_unknown_place_is_404() {
                    let facade = facade().await;
                    let err = facade
                        .get_reviews_by_place(&Uuid::new_v4())
                        .await
                        .unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
                }

                #[tokio::test]
                async fn test_update_and_delete_review() {
                    let w = world().await;
                    let review = w
                        .facade
                        .create_review(new_review(w.place.id, w.guest.id, 2))
                        .await
                        .unwrap();

                    let updated = w
                        .facade
                        .update_review(
                            &review.id,
                            ReviewUpdate {
                                text: Some("Better on second thought".to_string()),
                                rating: Some(4),
                            },
                        )
                        .await
                        .unwrap();
                    assert_eq!(updated.rating, 4);
                    assert_eq!(updated.place_id, w.place.id);

                    w.facade.delete_review(&review.id).await.unwrap();
                    let err = w.facade.delete_review(&review.id).await.unwrap_err();
                    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
                }
            }
        }
    };
}
