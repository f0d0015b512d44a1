//! Recipe repository implementation.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use recetario_shared::types::{RecipeId, UserId};
use tracing::{error, warn};

use super::error::RecipeError;
use super::types::{CreateRecipeInput, NewRecipe, Recipe, RecipeChanges};
use super::validation::{normalize_ingredient, validate_changes};
use crate::media::{LocalHandle, MediaEncoder, MediaReader};
use crate::observability::{PipelineObserver, PipelineStage, StageOutcome, TracingObserver};
use crate::storage::{ObjectStore, PublicLocator};

/// Structured store holding recipe rows.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait RecipeStore: Send + Sync {
    /// All recipes, most recent first.
    fn list(&self) -> impl Future<Output = Result<Vec<Recipe>, RecipeError>> + Send;

    /// Recipes whose ingredient array contains `ingredient` as a whole element.
    fn find_containing(
        &self,
        ingredient: &str,
    ) -> impl Future<Output = Result<Vec<Recipe>, RecipeError>> + Send;

    /// Find a recipe by ID.
    fn find_by_id(
        &self,
        id: RecipeId,
    ) -> impl Future<Output = Result<Option<Recipe>, RecipeError>> + Send;

    /// Insert a row; the store assigns `id` and `created_at`.
    fn insert(&self, recipe: NewRecipe)
    -> impl Future<Output = Result<Recipe, RecipeError>> + Send;

    /// Overwrite title, description and ingredients.
    ///
    /// With `owner` set, only a row owned by that user matches. Returns `None`
    /// when nothing matched.
    fn update(
        &self,
        id: RecipeId,
        owner: Option<UserId>,
        changes: &RecipeChanges,
    ) -> impl Future<Output = Result<Option<Recipe>, RecipeError>> + Send;

    /// Overwrite only the image locator.
    ///
    /// With `owner` set, only a row owned by that user matches. Returns `None`
    /// when nothing matched.
    fn set_image(
        &self,
        id: RecipeId,
        owner: Option<UserId>,
        image_url: &str,
    ) -> impl Future<Output = Result<Option<Recipe>, RecipeError>> + Send;

    /// Delete by ID, scoped to `owner` when set. Returns whether a row was removed.
    fn delete(
        &self,
        id: RecipeId,
        owner: Option<UserId>,
    ) -> impl Future<Output = Result<bool, RecipeError>> + Send;
}

/// Recipe CRUD with image upload orchestration.
///
/// Uploading and inserting are two separate remote operations with no
/// shared transaction. If the insert fails after a successful upload the
/// stored object is left behind as an orphan.
pub struct RecipeRepository<S: RecipeStore, O: ObjectStore, R: MediaReader> {
    store: Arc<S>,
    objects: Arc<O>,
    encoder: MediaEncoder<R>,
    observer: Arc<dyn PipelineObserver>,
}

impl<S: RecipeStore, O: ObjectStore, R: MediaReader> RecipeRepository<S, O, R> {
    /// Create a new recipe repository reporting checkpoints through `tracing`.
    #[must_use]
    pub fn new(store: Arc<S>, objects: Arc<O>, reader: Arc<R>) -> Self {
        Self {
            store,
            objects,
            encoder: MediaEncoder::new(reader),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the checkpoint observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// All recipes, most recent first.
    ///
    /// A store fault is logged and reported as an empty list; use
    /// [`Self::try_list`] to tell the two apart.
    pub async fn list(&self) -> Vec<Recipe> {
        self.try_list().await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to list recipes");
            Vec::new()
        })
    }

    /// All recipes, most recent first, with store faults surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the structured store fails.
    pub async fn try_list(&self) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.store.list().await?;
        Ok(newest_first(recipes))
    }

    /// Recipes listing `term` as one of their ingredients, case-insensitively.
    ///
    /// Only whole ingredients match: `"tom"` does not find `"tomato"`. A store
    /// fault is logged and reported as an empty list.
    pub async fn find_by_ingredient(&self, term: &str) -> Vec<Recipe> {
        self.try_find_by_ingredient(term)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, term, "Failed to search recipes by ingredient");
                Vec::new()
            })
    }

    /// Ingredient search with store faults surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the structured store fails.
    pub async fn try_find_by_ingredient(&self, term: &str) -> Result<Vec<Recipe>, RecipeError> {
        let needle = normalize_ingredient(term);
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let recipes = self.store.find_containing(&needle).await?;
        Ok(newest_first(recipes))
    }

    /// Get recipe by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist or the store fails.
    pub async fn get(&self, id: RecipeId) -> Result<Recipe, RecipeError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| RecipeError::not_found(id))
    }

    /// Create a recipe, uploading its photo first when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A field is blank or there are no ingredients
    /// - The photo cannot be read or uploaded (nothing is inserted)
    /// - The insert fails
    pub async fn create(&self, input: CreateRecipeInput) -> Result<Recipe, RecipeError> {
        let changes = validate_changes(RecipeChanges {
            title: input.title,
            description: input.description,
            ingredients: input.ingredients,
        })?;

        let image_url = match &input.image {
            Some(handle) => Some(self.upload_image(handle).await?.into_string()),
            None => None,
        };

        let orphan = image_url.clone();
        let new_recipe = NewRecipe {
            title: changes.title,
            description: changes.description,
            ingredients: changes.ingredients,
            owner_id: input.owner_id,
            image_url,
        };

        let result = self.persist(self.store.insert(new_recipe)).await;
        if let (Err(e), Some(url)) = (&result, orphan) {
            warn!(error = %e, image_url = %url, "Recipe insert failed after upload; image left orphaned");
        }
        result
    }

    /// Update title, description and ingredients of any recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is blank, the recipe does not exist, or the
    /// store fails.
    pub async fn update(&self, id: RecipeId, changes: RecipeChanges) -> Result<Recipe, RecipeError> {
        self.apply_update(id, None, changes).await
    }

    /// Update a recipe on behalf of `owner`.
    ///
    /// A recipe owned by someone else is reported as not found.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn update_as(
        &self,
        owner: UserId,
        id: RecipeId,
        changes: RecipeChanges,
    ) -> Result<Recipe, RecipeError> {
        self.apply_update(id, Some(owner), changes).await
    }

    async fn apply_update(
        &self,
        id: RecipeId,
        owner: Option<UserId>,
        changes: RecipeChanges,
    ) -> Result<Recipe, RecipeError> {
        let changes = validate_changes(changes)?;

        self.persist(async {
            self.store
                .update(id, owner, &changes)
                .await?
                .ok_or_else(|| RecipeError::not_found(id))
        })
        .await
    }

    /// Upload a new photo and point the recipe at it.
    ///
    /// The previous object, if any, stays in the bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist, the photo cannot be read
    /// or uploaded, or the store fails.
    pub async fn replace_image(
        &self,
        id: RecipeId,
        handle: &LocalHandle,
    ) -> Result<Recipe, RecipeError> {
        self.apply_replace_image(id, None, handle).await
    }

    /// Replace the photo of a recipe on behalf of `owner`.
    ///
    /// A recipe owned by someone else is reported as not found and nothing is
    /// uploaded.
    ///
    /// # Errors
    ///
    /// Same as [`Self::replace_image`].
    pub async fn replace_image_as(
        &self,
        owner: UserId,
        id: RecipeId,
        handle: &LocalHandle,
    ) -> Result<Recipe, RecipeError> {
        self.apply_replace_image(id, Some(owner), handle).await
    }

    async fn apply_replace_image(
        &self,
        id: RecipeId,
        owner: Option<UserId>,
        handle: &LocalHandle,
    ) -> Result<Recipe, RecipeError> {
        let current = self.get(id).await?;
        if owner.is_some_and(|o| o != current.owner_id) {
            return Err(RecipeError::not_found(id));
        }

        let locator = self.upload_image(handle).await?;
        self.apply_image_locator(id, owner, &locator).await
    }

    /// Point a recipe at an already uploaded photo.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist or the store fails.
    pub async fn set_image_locator(
        &self,
        id: RecipeId,
        locator: &PublicLocator,
    ) -> Result<Recipe, RecipeError> {
        self.apply_image_locator(id, None, locator).await
    }

    /// Point a recipe at an already uploaded photo on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist, is owned by someone
    /// else, or the store fails.
    pub async fn set_image_locator_as(
        &self,
        owner: UserId,
        id: RecipeId,
        locator: &PublicLocator,
    ) -> Result<Recipe, RecipeError> {
        self.apply_image_locator(id, Some(owner), locator).await
    }

    async fn apply_image_locator(
        &self,
        id: RecipeId,
        owner: Option<UserId>,
        locator: &PublicLocator,
    ) -> Result<Recipe, RecipeError> {
        self.persist(async {
            self.store
                .set_image(id, owner, locator.as_str())
                .await?
                .ok_or_else(|| RecipeError::not_found(id))
        })
        .await
    }

    /// Delete a recipe. Its stored photo is not removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist or the store fails.
    pub async fn delete(&self, id: RecipeId) -> Result<(), RecipeError> {
        self.apply_delete(id, None).await
    }

    /// Delete a recipe on behalf of `owner`.
    ///
    /// A recipe owned by someone else is reported as not found and kept.
    ///
    /// # Errors
    ///
    /// Same as [`Self::delete`].
    pub async fn delete_as(&self, owner: UserId, id: RecipeId) -> Result<(), RecipeError> {
        self.apply_delete(id, Some(owner)).await
    }

    async fn apply_delete(&self, id: RecipeId, owner: Option<UserId>) -> Result<(), RecipeError> {
        self.persist(async {
            if self.store.delete(id, owner).await? {
                Ok(())
            } else {
                Err(RecipeError::not_found(id))
            }
        })
        .await
    }

    /// Encode the local photo, then upload it.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or uploading fails.
    pub async fn upload_image(&self, handle: &LocalHandle) -> Result<PublicLocator, RecipeError> {
        self.observer
            .record(PipelineStage::Encode, StageOutcome::Started);
        let payload = self.encoder.encode(handle).await;
        self.checkpoint(PipelineStage::Encode, &payload, |_| None);
        let payload = payload?;

        self.observer
            .record(PipelineStage::Upload, StageOutcome::Started);
        let locator = self.objects.upload(payload).await;
        self.checkpoint(PipelineStage::Upload, &locator, |l| {
            Some(l.as_str().to_string())
        });

        Ok(locator?)
    }

    async fn persist<T, F>(&self, write: F) -> Result<T, RecipeError>
    where
        F: Future<Output = Result<T, RecipeError>>,
    {
        self.observer
            .record(PipelineStage::Persist, StageOutcome::Started);
        let result = write.await;
        self.checkpoint(PipelineStage::Persist, &result, |_| None);
        result
    }

    fn checkpoint<T, E: Display>(
        &self,
        stage: PipelineStage,
        result: &Result<T, E>,
        detail: impl FnOnce(&T) -> Option<String>,
    ) {
        match result {
            Ok(value) => {
                let detail = detail(value);
                self.observer.record(
                    stage,
                    StageOutcome::Completed {
                        detail: detail.as_deref(),
                    },
                );
            }
            Err(e) => {
                let reason = e.to_string();
                self.observer
                    .record(stage, StageOutcome::Failed { reason: &reason });
            }
        }
    }
}

/// Sort by creation time, most recent first.
fn newest_first(mut recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recipes
}
