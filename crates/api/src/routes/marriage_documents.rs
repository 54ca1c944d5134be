//! Route definitions for the `/marriage-documents` resource.

use std::convert::Infallible;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::marriage_documents::{self, UPLOAD_BODY_LIMIT};
use crate::state::AppState;

/// Routes mounted at `/marriage-documents`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> upload (multipart, 10 MiB)
/// GET    /marriage/{marriage_id}    -> list_by_marriage
/// GET    /download/{filename}       -> download
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(marriage_documents::list)
                .post(marriage_documents::upload)
                .layer::<_, Infallible>(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
                .layer::<_, Infallible>(RequestBodyLimitLayer::new(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/marriage/{marriage_id}",
            get(marriage_documents::list_by_marriage),
        )
        .route("/download/{filename}", get(marriage_documents::download))
        .route(
            "/{id}",
            get(marriage_documents::get_by_id)
                .put(marriage_documents::update)
                .patch(marriage_documents::update)
                .delete(marriage_documents::delete),
        )
}
