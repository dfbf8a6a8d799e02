use super::IngredientInput;
use crate::api::extract::ApiJson;
use crate::api::{failure_response, ErrorResponse};
use crate::error::RecipeError;
use crate::models::{Ingredient, NewRecipe, Recipe};
use crate::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub category: String,
    pub instructions: Option<String>,
    #[serde(default)]
    pub servings: i32,
    pub ingredients: Vec<IngredientInput>,
}

impl CreateRecipeRequest {
    pub fn into_new_recipe(self) -> Result<NewRecipe, RecipeError> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::Invalid("Please provide the recipe name".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(RecipeError::Invalid(
                "Please choose a category of the recipe".to_string(),
            ));
        }
        if self.ingredients.is_empty() {
            return Err(RecipeError::Invalid(
                "Please specify the ingredients of the recipe".to_string(),
            ));
        }
        if self.ingredients.iter().any(|i| i.name.trim().is_empty()) {
            return Err(RecipeError::Invalid(
                "Please specify the name of the ingredient".to_string(),
            ));
        }

        Ok(NewRecipe {
            name: self.name,
            category: self.category,
            instructions: self.instructions,
            servings: self.servings,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| Ingredient::new(i.name))
                .collect(),
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "A recipe with this name already exists", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(service): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(request): ApiJson<CreateRecipeRequest>,
) -> impl IntoResponse {
    let result = request
        .into_new_recipe()
        .and_then(|recipe| service.add_recipe(recipe));

    match result {
        Ok(recipe) => (StatusCode::CREATED, Json(recipe)).into_response(),
        Err(e) => failure_response(e, uri.path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, category: &str, ingredients: &[&str]) -> CreateRecipeRequest {
        CreateRecipeRequest {
            name: name.to_string(),
            category: category.to_string(),
            instructions: None,
            servings: 2,
            ingredients: ingredients
                .iter()
                .map(|n| IngredientInput { name: n.to_string() })
                .collect(),
        }
    }

    #[test]
    fn test_valid_request() {
        let recipe = request("Paneer Tikka", "Vegetarian", &["Paneer", "Curd"])
            .into_new_recipe()
            .unwrap();
        assert_eq!(recipe.ingredients.len(), 2);
        assert!(recipe.ingredients.iter().all(|i| i.id.is_none()));
    }

    #[test]
    fn test_blank_fields_rejected() {
        for bad in [
            request("  ", "Vegetarian", &["Paneer"]),
            request("Paneer Tikka", "", &["Paneer"]),
            request("Paneer Tikka", "Vegetarian", &[]),
            request("Paneer Tikka", "Vegetarian", &["Paneer", " "]),
        ] {
            assert!(matches!(bad.into_new_recipe(), Err(RecipeError::Invalid(_))));
        }
    }

    #[test]
    fn test_servings_default_to_zero() {
        let parsed: CreateRecipeRequest = serde_json::from_str(
            r#"{"name": "Toast", "category": "Breakfast", "ingredients": [{"name": "Bread"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.servings, 0);
        assert!(parsed.instructions.is_none());
    }
}
