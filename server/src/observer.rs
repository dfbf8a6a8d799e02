//! Observation hooks for the recipe service.
//!
//! The service reports each outcome as a [`RecipeEvent`] to an injected
//! [`RecipeObserver`]. Production uses [`TracingObserver`]; tests can record
//! the events instead.

use crate::filter::FilterRequest;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeEvent {
    Added { id: Uuid, name: String },
    AddRejected { name: String },
    Listed { count: usize },
    FetchMissed { id: Uuid },
    Updated { id: Uuid, ingredients: usize },
    Deleted { id: Uuid },
    DeleteMissed { id: Uuid },
    CategoryListed { category: String, count: usize },
    CategoryMissed { category: String },
    Searched { request: FilterRequest, count: usize },
}

pub trait RecipeObserver: Send + Sync + fmt::Debug {
    fn record(&self, event: &RecipeEvent);
}

/// Emits every event as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RecipeObserver for TracingObserver {
    fn record(&self, event: &RecipeEvent) {
        match event {
            RecipeEvent::Added { id, name } => {
                tracing::info!(recipe_id = %id, name = %name, "recipe added")
            }
            RecipeEvent::AddRejected { name } => {
                tracing::warn!(name = %name, "recipe already exists")
            }
            RecipeEvent::Listed { count } => tracing::info!(count, "listed recipes"),
            RecipeEvent::FetchMissed { id } => {
                tracing::warn!(recipe_id = %id, "recipe not found")
            }
            RecipeEvent::Updated { id, ingredients } => {
                tracing::info!(recipe_id = %id, ingredients, "recipe updated")
            }
            RecipeEvent::Deleted { id } => tracing::info!(recipe_id = %id, "recipe deleted"),
            RecipeEvent::DeleteMissed { id } => {
                tracing::info!(recipe_id = %id, "nothing to delete")
            }
            RecipeEvent::CategoryListed { category, count } => {
                tracing::info!(category = %category, count, "listed recipes by category")
            }
            RecipeEvent::CategoryMissed { category } => {
                tracing::warn!(category = %category, "no recipes in category")
            }
            RecipeEvent::Searched { request, count } => {
                tracing::info!(?request, count, "searched recipes")
            }
        }
    }
}
