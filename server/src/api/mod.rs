pub mod extract;
pub mod recipes;

use crate::error::RecipeError;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::models::{Ingredient, Recipe};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Request path that produced the error
    pub path: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>, path: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            timestamp: Utc::now(),
            message: message.into(),
            path: path.to_string(),
        }),
    )
        .into_response()
}

/// Map a service failure onto its HTTP status.
pub fn failure_response(error: RecipeError, path: &str) -> Response {
    let status = match &error {
        RecipeError::AlreadyExists(_) => StatusCode::CONFLICT,
        RecipeError::NotFound(_) => StatusCode::NOT_FOUND,
        RecipeError::Invalid(_) => StatusCode::BAD_REQUEST,
        RecipeError::Internal(e) => {
            tracing::error!(path, "Recipe operation failed: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                path,
            );
        }
    };

    error_response(status, error.to_string(), path)
}

/// Build the application router with Swagger UI.
pub fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi());

    Router::new()
        .nest("/api/recipes", recipes::router())
        .merge(swagger_ui)
        .with_state(state)
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, Recipe, Ingredient)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();
    let module_spec = recipes::ApiDoc::openapi();

    spec.paths.paths.extend(module_spec.paths.paths);
    if let Some(module_components) = module_spec.components {
        if let Some(spec_components) = spec.components.as_mut() {
            spec_components.schemas.extend(module_components.schemas);
        }
    }

    spec
}
