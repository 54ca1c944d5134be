//! Route definitions for the `/eucharists` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::eucharists;
use crate::state::AppState;

/// Routes mounted at `/eucharists`.
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
        .route("/", get(eucharists::list).post(eucharists::create))
        .route("/user/{user_id}", get(eucharists::list_by_user))
        .route(
            "/{id}",
            get(eucharists::get_by_id)
                .put(eucharists::update)
                .patch(eucharists::update)
                .delete(eucharists::delete),
        )
}
