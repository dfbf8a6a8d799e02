//! Record store abstraction for recipes.
//!
//! The service only talks to a [`RecipeStore`]. Two implementations exist:
//! Postgres via diesel for deployments, and an in-memory store for tests and
//! local runs without a database.

mod memory;
mod postgres;

pub use memory::MemoryRecipeStore;
pub use postgres::PgRecipeStore;

use crate::filter::Predicate;
use crate::models::{NewRecipe, Recipe};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Recipe {0} is not stored")]
    Missing(Uuid),

    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Trait for recipe record stores.
///
/// A store owns the ingredient rows of each recipe and writes them together
/// with the parent row.
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// Persist a new recipe, assigning ids to it and its ingredients.
    fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// Overwrite an existing recipe and replace its ingredient rows.
    /// Ingredients without an id are assigned one.
    fn update(&self, recipe: Recipe) -> Result<Recipe, StoreError>;

    fn fetch_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError>;

    fn fetch_all(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Exact (case-sensitive) name lookup.
    fn exists_by_name(&self, name: &str) -> Result<bool, StoreError>;

    fn exists_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    /// Recipes whose category equals `category`, ignoring case.
    fn fetch_by_category(&self, category: &str) -> Result<Vec<Recipe>, StoreError>;

    /// Recipes matching `predicate`.
    ///
    /// When the predicate constrains ingredients a store may return a recipe
    /// once per joined ingredient row; callers deduplicate by id. A recipe
    /// with no ingredients satisfies any exclusion and no inclusion, and is
    /// returned when the rest of the predicate holds.
    fn query(&self, predicate: &Predicate) -> Result<Vec<Recipe>, StoreError>;
}
