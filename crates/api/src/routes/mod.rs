pub mod health;

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET    /categories         -> categories::list (tree, or flat with ?flat=true)
/// POST   /categories         -> categories::create
/// PUT    /categories/{id}    -> categories::update
/// DELETE /categories/{id}    -> categories::delete (cascades)
/// GET    /logs               -> logs::list
/// POST   /logs               -> logs::save (upsert + threshold headers)
/// DELETE /logs/{id}          -> logs::delete
/// GET    /stats              -> stats::totals
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::categories::list).post(handlers::categories::create),
        )
        .route(
            "/categories/{id}",
            put(handlers::categories::update).delete(handlers::categories::delete),
        )
        .route("/logs", get(handlers::logs::list).post(handlers::logs::save))
        .route("/logs/{id}", delete(handlers::logs::delete))
        .route("/stats", get(handlers::stats::totals))
}
