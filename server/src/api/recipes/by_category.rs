use super::RecipesResponse;
use crate::api::extract::ApiPath;
use crate::api::{failure_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/recipes/category/{category}",
    tag = "recipes",
    params(
        ("category" = String, Path, description = "Category name, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Recipes in the category", body = RecipesResponse),
        (status = 404, description = "No recipes in the category", body = ErrorResponse)
    )
)]
pub async fn list_recipes_by_category(
    State(service): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(category): ApiPath<String>,
) -> impl IntoResponse {
    match service.get_recipes_by_category(&category) {
        Ok(recipes) => (StatusCode::OK, Json(RecipesResponse { recipes })).into_response(),
        Err(e) => failure_response(e, uri.path()),
    }
}
