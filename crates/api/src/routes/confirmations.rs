//! Route definitions for the `/confirmations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::confirmations;
use crate::state::AppState;

/// Routes mounted at `/confirmations`.
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
        .route("/", get(confirmations::list).post(confirmations::create))
        .route("/user/{user_id}", get(confirmations::list_by_user))
        .route(
            "/{id}",
            get(confirmations::get_by_id)
                .put(confirmations::update)
                .patch(confirmations::update)
                .delete(confirmations::delete),
        )
}
