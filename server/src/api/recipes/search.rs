use super::RecipesResponse;
use crate::api::extract::ApiJson;
use crate::api::{failure_response, ErrorResponse};
use crate::filter::FilterRequest;
use crate::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Search recipes by category, servings, instructions text and ingredients.
///
/// Every field of the request is optional. `ingredients` maps a name to
/// `true` (recipe must contain it) or `false` (recipe must not contain it).
/// No matches yields an empty list.
#[utoipa::path(
    post,
    path = "/api/recipes/search",
    tag = "recipes",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Matching recipes", body = RecipesResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(service): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(request): ApiJson<FilterRequest>,
) -> impl IntoResponse {
    match service.search_recipes_by_criteria(&request) {
        Ok(recipes) => (StatusCode::OK, Json(RecipesResponse { recipes })).into_response(),
        Err(e) => failure_response(e, uri.path()),
    }
}
