pub mod auth;
pub mod baptisms;
pub mod confirmations;
pub mod eucharists;
pub mod health;
pub mod marriage_documents;
pub mod marriage_parties;
pub mod marriages;
pub mod parishes;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   self-registration (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (refresh cookie)
/// /auth/logout                                     logout (either cookie)
/// /auth/me                                         current user
/// /auth/verify-email?token=                        email verification (public)
///
/// /users                                           list, create
/// /users/count                                     total user count
/// /users/name/{name}                               search by name
/// /users/parish/{parish_id}                        users of a parish
/// /users/{id}                                      get, update, delete
///
/// /parishes                                        list, create
/// /parishes/name/{name}                            full-text name search
/// /parishes/deanery/{deanery}                      parishes of a deanery
/// /parishes/{id}                                   get, update, delete
///
/// /baptisms | /confirmations | /eucharists         list, create
///     /user/{user_id}                              records of one person
///     /{id}                                        get, update, delete
///
/// /marriages                                       list, create
/// /marriages/user/{user_id}                        marriages of one person
/// /marriages/user/{user_id}/full                   with parties and documents
/// /marriages/{id}                                  get, update, delete
///
/// /marriage-parties                                list, create
/// /marriage-parties/marriage/{marriage_id}         parties of a marriage
/// /marriage-parties/{id}                           get, update, delete
///
/// /marriage-documents                              list, upload (multipart)
/// /marriage-documents/marriage/{marriage_id}       documents of a marriage
/// /marriage-documents/download/{filename}          stream a stored file
/// /marriage-documents/{id}                         get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/parishes", parishes::router())
        // Sacrament registers.
        .nest("/baptisms", baptisms::router())
        .nest("/confirmations", confirmations::router())
        .nest("/eucharists", eucharists::router())
        .nest("/marriages", marriages::router())
        .nest("/marriage-parties", marriage_parties::router())
        .nest("/marriage-documents", marriage_documents::router())
}
