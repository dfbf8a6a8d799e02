use super::IngredientInput;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::{failure_response, ErrorResponse};
use crate::error::RecipeError;
use crate::models::{Ingredient, Recipe, RecipeUpdate};
use crate::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Partial update. Omitted fields keep their stored values; ingredients are
/// merged into the stored list by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub category: Option<String>,
    pub instructions: Option<String>,
    pub servings: Option<i32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
}

impl UpdateRecipeRequest {
    pub fn into_update(self, id: Uuid) -> Result<RecipeUpdate, RecipeError> {
        if self.ingredients.iter().any(|i| i.name.trim().is_empty()) {
            return Err(RecipeError::Invalid(
                "Please specify the name of the ingredient".to_string(),
            ));
        }

        Ok(RecipeUpdate {
            id,
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
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(service): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateRecipeRequest>,
) -> impl IntoResponse {
    let result = request
        .into_update(id)
        .and_then(|update| service.update_recipe_by_id(update));

    match result {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => failure_response(e, uri.path()),
    }
}
