//! Route definitions for the `/parishes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::parishes;
use crate::state::AppState;

/// Routes mounted at `/parishes`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /name/{name}           -> find_by_name
/// GET    /deanery/{deanery}     -> list_by_deanery
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// PATCH  /{id}                  -> update
/// DELETE /{id}                  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parishes::list).post(parishes::create))
        .route("/name/{name}", get(parishes::find_by_name))
        .route("/deanery/{deanery}", get(parishes::list_by_deanery))
        .route(
            "/{id}",
            get(parishes::get_by_id)
                .put(parishes::update)
                .patch(parishes::update)
                .delete(parishes::delete),
        )
}
