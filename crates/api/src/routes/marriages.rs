//! Route definitions for the `/marriages` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::marriages;
use crate::state::AppState;

/// Routes mounted at `/marriages`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// GET    /user/{user_id}         -> list_by_user
/// GET    /user/{user_id}/full    -> list_full_by_user
/// GET    /{id}                   -> get_by_id
/// PUT    /{id}                   -> update
/// PATCH  /{id}                   -> update
/// DELETE /{id}                   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(marriages::list).post(marriages::create))
        .route("/user/{user_id}", get(marriages::list_by_user))
        .route("/user/{user_id}/full", get(marriages::list_full_by_user))
        .route(
            "/{id}",
            get(marriages::get_by_id)
                .put(marriages::update)
                .patch(marriages::update)
                .delete(marriages::delete),
        )
}
