//! Route definitions for the `/marriage-parties` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::marriage_parties;
use crate::state::AppState;

/// Routes mounted at `/marriage-parties`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /marriage/{marriage_id}    -> list_by_marriage
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(marriage_parties::list).post(marriage_parties::create),
        )
        .route(
            "/marriage/{marriage_id}",
            get(marriage_parties::list_by_marriage),
        )
        .route(
            "/{id}",
            get(marriage_parties::get_by_id)
                .put(marriage_parties::update)
                .patch(marriage_parties::update)
                .delete(marriage_parties::delete),
        )
}
