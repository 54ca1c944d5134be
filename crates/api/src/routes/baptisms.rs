//! Route definitions for the `/baptisms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::baptisms;
use crate::state::AppState;

/// Routes mounted at `/baptisms`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /user/{user_id}    -> list_by_user
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// PATCH  /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(baptisms::list).post(baptisms::create))
        .route("/user/{user_id}", get(baptisms::list_by_user))
        .route(
            "/{id}",
            get(baptisms::get_by_id)
                .put(baptisms::update)
                .patch(baptisms::update)
                .delete(baptisms::delete),
        )
}
