use super::RecipesResponse;
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
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes", body = RecipesResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(service): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    match service.get_all_recipes() {
        Ok(recipes) => (StatusCode::OK, Json(RecipesResponse { recipes })).into_response(),
        Err(e) => failure_response(e, uri.path()),
    }
}
