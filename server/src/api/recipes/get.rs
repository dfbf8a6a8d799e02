use crate::api::extract::ApiPath;
use crate::api::{failure_response, ErrorResponse};
use crate::models::Recipe;
use crate::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(service): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
) -> impl IntoResponse {
    match service.get_recipe(id) {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => failure_response(e, uri.path()),
    }
}
