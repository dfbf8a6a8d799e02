//! Recipe operations on top of a [`RecipeStore`].
//!
//! Enforces name uniqueness on add and existence on get/update, merges
//! ingredient lists on update, and delegates searches to the
//! [`RecipeQueryEngine`].

use crate::error::RecipeError;
use crate::filter::FilterRequest;
use crate::merge::merge_ingredients;
use crate::models::{NewRecipe, Recipe, RecipeUpdate};
use crate::observer::{RecipeEvent, RecipeObserver, TracingObserver};
use crate::query::RecipeQueryEngine;
use crate::store::{RecipeStore, StoreError};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
    queries: RecipeQueryEngine,
    observer: Arc<dyn RecipeObserver>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self::with_observer(store, Arc::new(TracingObserver))
    }

    pub fn with_observer(store: Arc<dyn RecipeStore>, observer: Arc<dyn RecipeObserver>) -> Self {
        Self {
            queries: RecipeQueryEngine::new(store.clone()),
            store,
            observer,
        }
    }

    fn record(&self, event: RecipeEvent) {
        self.observer.record(&event);
    }

    /// Store a new recipe. Fails with `AlreadyExists` when the name is taken.
    pub fn add_recipe(&self, recipe: NewRecipe) -> Result<Recipe, RecipeError> {
        // The unique index is authoritative; this check only avoids a doomed insert.
        if self.store.exists_by_name(&recipe.name)? {
            self.record(RecipeEvent::AddRejected { name: recipe.name.clone() });
            return Err(RecipeError::AlreadyExists(recipe.name));
        }

        let name = recipe.name.clone();
        match self.store.insert(recipe) {
            Ok(stored) => {
                self.record(RecipeEvent::Added {
                    id: stored.id,
                    name: stored.name.clone(),
                });
                Ok(stored)
            }
            Err(StoreError::Conflict(_)) => {
                self.record(RecipeEvent::AddRejected { name: name.clone() });
                Err(RecipeError::AlreadyExists(name))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_all_recipes(&self) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.store.fetch_all()?;
        self.record(RecipeEvent::Listed { count: recipes.len() });
        Ok(recipes)
    }

    pub fn get_recipe(&self, id: Uuid) -> Result<Recipe, RecipeError> {
        match self.store.fetch_by_id(id)? {
            Some(recipe) => Ok(recipe),
            None => {
                self.record(RecipeEvent::FetchMissed { id });
                Err(RecipeError::recipe_not_found(id))
            }
        }
    }

    /// Apply a partial update to a stored recipe.
    ///
    /// A non-empty ingredient list is merged into the stored one by name.
    /// Category, instructions and servings replace the stored values only when
    /// present.
    pub fn update_recipe_by_id(&self, update: RecipeUpdate) -> Result<Recipe, RecipeError> {
        let mut recipe = self.get_recipe(update.id)?;

        if !update.ingredients.is_empty() {
            recipe.ingredients = merge_ingredients(recipe.ingredients, update.ingredients);
        }
        if let Some(category) = update.category {
            recipe.category = category;
        }
        if let Some(instructions) = update.instructions {
            recipe.instructions = Some(instructions);
        }
        if let Some(servings) = update.servings {
            recipe.servings = servings;
        }

        let updated = match self.store.update(recipe) {
            Ok(updated) => updated,
            // Deleted between the fetch and the write
            Err(StoreError::Missing(id)) => return Err(RecipeError::recipe_not_found(id)),
            Err(e) => return Err(e.into()),
        };

        self.record(RecipeEvent::Updated {
            id: updated.id,
            ingredients: updated.ingredients.len(),
        });
        Ok(updated)
    }

    /// Remove a recipe. Returns `false` when there was nothing to remove.
    pub fn delete_recipe_by_id(&self, id: Uuid) -> Result<bool, RecipeError> {
        if !self.store.exists_by_id(id)? {
            self.record(RecipeEvent::DeleteMissed { id });
            return Ok(false);
        }

        self.store.delete_by_id(id)?;
        self.record(RecipeEvent::Deleted { id });
        Ok(true)
    }

    /// Recipes in a category (case-insensitive). Fails with `NotFound` when
    /// the category is empty.
    pub fn get_recipes_by_category(&self, category: &str) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.queries.by_category(category)?;
        if recipes.is_empty() {
            self.record(RecipeEvent::CategoryMissed {
                category: category.to_string(),
            });
            return Err(RecipeError::NotFound(format!(
                "No recipes found under: {}",
                category
            )));
        }

        self.record(RecipeEvent::CategoryListed {
            category: category.to_string(),
            count: recipes.len(),
        });
        Ok(recipes)
    }

    /// Recipes matching the filter; no matches is an empty list, not an error.
    pub fn search_recipes_by_criteria(
        &self,
        request: &FilterRequest,
    ) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.queries.search(request)?;
        self.record(RecipeEvent::Searched {
            request: request.clone(),
            count: recipes.len(),
        });
        Ok(recipes)
    }
}
