use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe already exists with name {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error("Store failure: {0}")]
    Internal(#[from] StoreError),
}

impl RecipeError {
    pub fn recipe_not_found(id: impl std::fmt::Display) -> Self {
        RecipeError::NotFound(format!("Recipe not found: {}", id))
    }
}
