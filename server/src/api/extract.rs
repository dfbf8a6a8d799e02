//! Request extractors whose rejections use the shared `ErrorResponse` body.

use crate::api::error_response;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, OriginalUri, Path, Request,
    },
    http::{request::Parts, Extensions, Uri},
    response::Response,
    Json,
};

/// Path of the request as the client sent it, before any `nest` stripping.
fn request_path(extensions: &Extensions, uri: &Uri) -> String {
    extensions
        .get::<OriginalUri>()
        .map_or(uri.path(), |original| original.0.path())
        .to_string()
}

/// JSON body extractor. Malformed or mistyped bodies are answered with an
/// `ErrorResponse` carrying axum's status (400, 415 or 422).
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = request_path(req.extensions(), req.uri());

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(error_response(
                rejection.status(),
                rejection.body_text(),
                &path,
            )),
        }
    }
}

/// Path parameter extractor with an `ErrorResponse` rejection.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(error_response(
                rejection.status(),
                rejection.body_text(),
                &request_path(&parts.extensions, &parts.uri),
            )),
        }
    }
}
