//! HbnbFacade: validation and referential integrity across repositories

use crate::core::error::{AuthError, EntityError, HbnbResult};
use crate::core::{Entity, HbnbError, Repository};
use crate::entities::{
    Amenity, AmenityUpdate, NewAmenity, NewPlace, NewReview, NewUser, Place, PlaceUpdate, Review,
    ReviewUpdate, User, UserUpdate,
};
use crate::storage::InMemoryRepository;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Service layer mediating between the API handlers and the repositories
///
/// Owns one repository per entity kind. Every cross-entity rule (owner
/// existence, unique emails and amenity names, one review per user and
/// place, cascading deletes) is enforced here so callers never have to
/// touch the repositories directly.
#[derive(Clone)]
pub struct HbnbFacade {
    users: Arc<dyn Repository<User>>,
    places: Arc<dyn Repository<Place>>,
    amenities: Arc<dyn Repository<Amenity>>,
    reviews: Arc<dyn Repository<Review>>,
}

impl HbnbFacade {
    pub fn new(
        users: Arc<dyn Repository<User>>,
        places: Arc<dyn Repository<Place>>,
        amenities: Arc<dyn Repository<Amenity>>,
        reviews: Arc<dyn Repository<Review>>,
    ) -> Self {
        Self {
            users,
            places,
            amenities,
            reviews,
        }
    }

    /// Facade over fresh in-memory repositories
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<User>::new()),
            Arc::new(InMemoryRepository::<Place>::new()),
            Arc::new(InMemoryRepository::<Amenity>::new()),
            Arc::new(InMemoryRepository::<Review>::new()),
        )
    }

    /// Facade over SQLite repositories sharing one pool
    #[cfg(feature = "sqlite")]
    pub fn sqlite(pool: sqlx::SqlitePool) -> Self {
        use crate::storage::SqliteRepository;

        Self::new(
            Arc::new(SqliteRepository::<User>::new(pool.clone())),
            Arc::new(SqliteRepository::<Place>::new(pool.clone())),
            Arc::new(SqliteRepository::<Amenity>::new(pool.clone())),
            Arc::new(SqliteRepository::<Review>::new(pool)),
        )
    }

    async fn require<T: Entity>(repo: &Arc<dyn Repository<T>>, id: &Uuid) -> HbnbResult<T> {
        repo.get(id)
            .await?
            .ok_or_else(|| HbnbError::not_found(T::resource_name_singular(), *id))
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn create_user(&self, input: NewUser) -> HbnbResult<User> {
        input.validate()?;
        self.ensure_email_free(&input.email, None).await?;

        let user = self.users.add(User::new(input)?).await?;
        tracing::info!(user_id = %user.id, is_admin = user.is_admin, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &Uuid) -> HbnbResult<User> {
        Self::require(&self.users, user_id).await
    }

    pub async fn get_all_users(&self) -> HbnbResult<Vec<User>> {
        self.users.get_all().await
    }

    pub async fn get_user_by_email(&self, email: &str) -> HbnbResult<Option<User>> {
        if email.is_empty() {
            return Err(HbnbError::field("email", "Email cannot be empty."));
        }
        self.users.get_by_attribute("email", email).await
    }

    pub async fn update_user(&self, user_id: &Uuid, update: UserUpdate) -> HbnbResult<User> {
        let mut user = self.get_user(user_id).await?;
        if let Some(email) = update.email.as_deref() {
            self.ensure_email_free(email, Some(user.id)).await?;
        }

        user.apply(update)?;
        let user = self.users.update(user_id, user).await?;
        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    /// Delete a user along with their places (and those places' reviews) and
    /// every review they wrote
    pub async fn delete_user(&self, user_id: &Uuid) -> HbnbResult<()> {
        let user = self.get_user(user_id).await?;

        let owned = self
            .places
            .find_by_attribute("owner_id", &user.id.to_string())
            .await?;
        for place in owned {
            self.delete_place(&place.id).await?;
        }

        let written = self
            .reviews
            .find_by_attribute("user_id", &user.id.to_string())
            .await?;
        for review in written {
            self.reviews.delete(&review.id).await?;
        }

        self.users.delete(&user.id).await?;
        tracing::info!(user_id = %user.id, "user deleted");
        Ok(())
    }

    /// Resolve credentials to a user; any mismatch is reported identically
    pub async fn authenticate(&self, email: &str, password: &str) -> HbnbResult<User> {
        let user = match self.users.get_by_attribute("email", email).await? {
            Some(user) if user.verify_password(password) => user,
            _ => {
                tracing::warn!("failed login attempt");
                return Err(AuthError::InvalidCredentials.into());
            }
        };
        Ok(user)
    }

    pub async fn has_users(&self) -> HbnbResult<bool> {
        Ok(self.users.count().await? > 0)
    }

    async fn ensure_email_free(&self, email: &str, except: Option<Uuid>) -> HbnbResult<()> {
        match self.get_user_by_email(email).await? {
            Some(existing) if Some(existing.id) != except => Err(EntityError::Duplicate {
                entity_type: "User".to_string(),
                field: "email".to_string(),
                value: email.to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    // =========================================================================
    // Amenities
    // =========================================================================

    pub async fn create_amenity(&self, input: NewAmenity) -> HbnbResult<Amenity> {
        input.validate()?;
        self.ensure_amenity_name_free(&input.name, None).await?;

        let amenity = self.amenities.add(Amenity::new(input)?).await?;
        tracing::info!(amenity_id = %amenity.id, name = %amenity.name, "amenity created");
        Ok(amenity)
    }

    pub async fn get_amenity(&self, amenity_id: &Uuid) -> HbnbResult<Amenity> {
        Self::require(&self.amenities, amenity_id).await
    }

    pub async fn get_all_amenities(&self) -> HbnbResult<Vec<Amenity>> {
        self.amenities.get_all().await
    }

    pub async fn update_amenity(
        &self,
        amenity_id: &Uuid,
        update: AmenityUpdate,
    ) -> HbnbResult<Amenity> {
        let mut amenity = self.get_amenity(amenity_id).await?;
        if let Some(name) = update.name.as_deref() {
            self.ensure_amenity_name_free(name, Some(amenity.id)).await?;
        }

        amenity.apply(update)?;
        self.amenities.update(amenity_id, amenity).await
    }

    /// Delete an amenity and detach it from every place
    pub async fn delete_amenity(&self, amenity_id: &Uuid) -> HbnbResult<()> {
        let amenity = self.get_amenity(amenity_id).await?;

        for mut place in self.places.get_all().await? {
            if place.remove_amenity(&amenity.id) {
                let place_id = place.id;
                self.places.update(&place_id, place).await?;
            }
        }

        self.amenities.delete(&amenity.id).await?;
        tracing::info!(amenity_id = %amenity.id, "amenity deleted");
        Ok(())
    }

    async fn ensure_amenity_name_free(&self, name: &str, except: Option<Uuid>) -> HbnbResult<()> {
        match self.amenities.get_by_attribute("name", name).await? {
            Some(existing) if Some(existing.id) != except => Err(EntityError::Duplicate {
                entity_type: "Amenity".to_string(),
                field: "name".to_string(),
                value: name.to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    // =========================================================================
    // Places
    // =========================================================================

    /// Create a place; `owner_id` must name an existing user
    pub async fn create_place(&self, input: NewPlace) -> HbnbResult<Place> {
        let owner_id = input
            .owner_id
            .ok_or_else(|| HbnbError::field("owner_id", "Owner is required."))?;
        if self.users.get(&owner_id).await?.is_none() {
            return Err(HbnbError::field("owner_id", "Owner not found."));
        }

        let place = self.places.add(Place::new(input, owner_id)?).await?;
        tracing::info!(place_id = %place.id, owner_id = %owner_id, "place created");
        Ok(place)
    }

    pub async fn get_place(&self, place_id: &Uuid) -> HbnbResult<Place> {
        Self::require(&self.places, place_id).await
    }

    pub async fn get_all_places(&self) -> HbnbResult<Vec<Place>> {
        self.places.get_all().await
    }

    pub async fn update_place(&self, place_id: &Uuid, update: PlaceUpdate) -> HbnbResult<Place> {
        let mut place = self.get_place(place_id).await?;
        place.apply(update)?;
        self.places.update(place_id, place).await
    }

    /// Delete a place and every review written about it
    pub async fn delete_place(&self, place_id: &Uuid) -> HbnbResult<()> {
        let place = self.get_place(place_id).await?;

        let reviews = self
            .reviews
            .find_by_attribute("place_id", &place.id.to_string())
            .await?;
        for review in &reviews {
            self.reviews.delete(&review.id).await?;
        }

        self.places.delete(&place.id).await?;
        tracing::info!(place_id = %place.id, reviews = reviews.len(), "place deleted");
        Ok(())
    }

    /// Attach an amenity, looked up by name, to a place
    pub async fn add_amenity_to_place(
        &self,
        place_id: &Uuid,
        amenity_name: &str,
    ) -> HbnbResult<Place> {
        let mut place = self.get_place(place_id).await?;
        let amenity = self
            .amenities
            .get_by_attribute("name", amenity_name)
            .await?
            .ok_or_else(|| EntityError::NotFoundBy {
                entity_type: "Amenity".to_string(),
                field: "name".to_string(),
                value: amenity_name.to_string(),
            })?;

        place.add_amenity(amenity.id)?;
        let place = self.places.update(place_id, place).await?;
        tracing::debug!(place_id = %place.id, amenity_id = %amenity.id, "amenity attached");
        Ok(place)
    }

    /// Amenities attached to a place, in attachment order
    ///
    /// Dangling ids are skipped.
    pub async fn get_place_amenities(&self, place_id: &Uuid) -> HbnbResult<Vec<Amenity>> {
        let place = self.get_place(place_id).await?;

        let mut amenities = Vec::with_capacity(place.amenity_ids.len());
        for amenity_id in &place.amenity_ids {
            if let Some(amenity) = self.amenities.get(amenity_id).await? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    pub async fn get_place_owner(&self, place: &Place) -> HbnbResult<User> {
        self.get_user(&place.owner_id).await
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    pub async fn create_review(&self, input: NewReview) -> HbnbResult<Review> {
        input.validate()?;

        let place = self.get_place(&input.place_id).await?;
        let user_id = input
            .user_id
            .ok_or_else(|| HbnbError::field("user_id", "User is required."))?;
        if self.users.get(&user_id).await?.is_none() {
            return Err(HbnbError::field("user_id", "User not found."));
        }

        if place.owner_id == user_id {
            return Err(HbnbError::rule("You cannot review your own place"));
        }
        if self
            .get_review_by_place_and_user(&place.id, &user_id)
            .await?
            .is_some()
        {
            return Err(HbnbError::rule("You have already reviewed this place"));
        }

        let review = self.reviews.add(Review::new(input, user_id)?).await?;
        tracing::info!(review_id = %review.id, place_id = %place.id, "review created");
        Ok(review)
    }

    pub async fn get_review(&self, review_id: &Uuid) -> HbnbResult<Review> {
        Self::require(&self.reviews, review_id).await
    }

    pub async fn get_all_reviews(&self) -> HbnbResult<Vec<Review>> {
        self.reviews.get_all().await
    }

    pub async fn get_reviews_by_place(&self, place_id: &Uuid) -> HbnbResult<Vec<Review>> {
        let place = self.get_place(place_id).await?;
        self.reviews
            .find_by_attribute("place_id", &place.id.to_string())
            .await
    }

    pub async fn get_review_by_place_and_user(
        &self,
        place_id: &Uuid,
        user_id: &Uuid,
    ) -> HbnbResult<Option<Review>> {
        let reviews = self
            .reviews
            .find_by_attribute("place_id", &place_id.to_string())
            .await?;
        Ok(reviews.into_iter().find(|r| r.user_id == *user_id))
    }

    pub async fn update_review(
        &self,
        review_id: &Uuid,
        update: ReviewUpdate,
    ) -> HbnbResult<Review> {
        let mut review = self.get_review(review_id).await?;
        review.apply(update)?;
        self.reviews.update(review_id, review).await
    }

    pub async fn delete_review(&self, review_id: &Uuid) -> HbnbResult<()> {
        let review = self.get_review(review_id).await?;
        self.reviews.delete(&review.id).await?;
        tracing::info!(review_id = %review.id, "review deleted");
        Ok(())
    }
}

impl Default for HbnbFacade {
    fn default() -> Self {
        Self::in_memory()
    }
}
