//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                      -> list (register viewers)
/// POST   /                      -> create (admin)
/// GET    /count                 -> count
/// GET    /name/{name}           -> find_by_name
/// GET    /parish/{parish_id}    -> list_by_parish
/// GET    /{id}                  -> get_by_id (self or register viewers)
/// PUT    /{id}                  -> update (self or admin)
/// PATCH  /{id}                  -> update
/// DELETE /{id}                  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/count", get(users::count))
        .route("/name/{name}", get(users::find_by_name))
        .route("/parish/{parish_id}", get(users::list_by_parish))
        .route(
            "/{id}",
            get(users::get_by_id)
                .put(users::update)
                .patch(users::update)
                .delete(users::delete),
        )
}
