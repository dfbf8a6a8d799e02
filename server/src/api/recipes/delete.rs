use crate::api::extract::ApiPath;
use crate::api::{error_response, failure_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(service): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
) -> impl IntoResponse {
    match service.delete_recipe_by_id(id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(
            StatusCode::NOT_FOUND,
            format!("Recipe not found: {}", id),
            uri.path(),
        ),
        Err(e) => failure_response(e, uri.path()),
    }
}
