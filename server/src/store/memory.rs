//! In-memory recipe store.
//!
//! Holds recipes in insertion order behind a lock. Name uniqueness is enforced
//! on insert, mirroring the unique index of the Postgres schema.

use super::{RecipeStore, StoreError};
use crate::filter::Predicate;
use crate::models::{Ingredient, NewRecipe, Recipe};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Recipe>>, StoreError> {
        self.recipes.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Recipe>>, StoreError> {
        self.recipes.write().map_err(|_| StoreError::Poisoned)
    }
}

fn assign_ids(ingredients: Vec<Ingredient>) -> Vec<Ingredient> {
    ingredients
        .into_iter()
        .map(|ingredient| Ingredient {
            id: Some(ingredient.id.unwrap_or_else(Uuid::new_v4)),
            name: ingredient.name,
        })
        .collect()
}

impl RecipeStore for MemoryRecipeStore {
    fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let mut recipes = self.write()?;
        if recipes.iter().any(|r| r.name == recipe.name) {
            return Err(StoreError::Conflict(format!(
                "recipe name '{}' is taken",
                recipe.name
            )));
        }

        let stored = Recipe {
            id: Uuid::new_v4(),
            name: recipe.name,
            category: recipe.category,
            instructions: recipe.instructions,
            servings: recipe.servings,
            ingredients: assign_ids(recipe.ingredients),
        };
        recipes.push(stored.clone());
        Ok(stored)
    }

    fn update(&self, recipe: Recipe) -> Result<Recipe, StoreError> {
        let mut recipes = self.write()?;
        let Some(slot) = recipes.iter_mut().find(|r| r.id == recipe.id) else {
            return Err(StoreError::Missing(recipe.id));
        };

        *slot = Recipe {
            ingredients: assign_ids(recipe.ingredients),
            ..recipe
        };
        Ok(slot.clone())
    }

    fn fetch_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        Ok(self.read()?.iter().find(|r| r.id == id).cloned())
    }

    fn fetch_all(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.read()?.clone())
    }

    fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.read()?.iter().any(|r| r.name == name))
    }

    fn exists_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.read()?.iter().any(|r| r.id == id))
    }

    fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.write()?.retain(|r| r.id != id);
        Ok(())
    }

    fn fetch_by_category(&self, category: &str) -> Result<Vec<Recipe>, StoreError> {
        self.query(&Predicate::category(category))
    }

    fn query(&self, predicate: &Predicate) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.read()?;
        let joined = predicate.joins_ingredients();
        let mut rows = Vec::new();

        for recipe in recipes.iter().filter(|r| predicate.matches(r)) {
            if joined {
                // One row per joined ingredient. A recipe without ingredients can only
                // match through exclusions, which hold vacuously; it comes back once.
                let copies = recipe.ingredients.len().max(1);
                rows.extend((0..copies).map(|_| recipe.clone()));
            } else {
                rows.push(recipe.clone());
            }
        }

        Ok(rows)
    }
}
