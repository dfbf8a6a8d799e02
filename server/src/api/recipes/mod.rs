pub mod by_category;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;
pub mod update;

use crate::models::Recipe;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Ingredient as sent by clients; ids are assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientInput {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipesResponse {
    pub recipes: Vec<Recipe>,
}

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/search", post(search::search_recipes))
        .route("/category/{category}", get(by_category::list_recipes_by_category))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        by_category::list_recipes_by_category,
        update::update_recipe,
        delete::delete_recipe,
        search::search_recipes,
    ),
    components(schemas(
        IngredientInput,
        RecipesResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        crate::filter::FilterRequest,
    ))
)]
pub struct ApiDoc;
