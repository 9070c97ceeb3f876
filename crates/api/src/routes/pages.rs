//! Route definitions for page editing and lifecycle.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes mounted at `/api/v1/pages`.
///
/// ```text
/// GET    /                -> list_pages
/// POST   /                -> create_page
/// GET    /{id}            -> get_page
/// PUT    /{id}            -> save_page
/// DELETE /{id}            -> delete_page
/// POST   /{id}/publish    -> publish_page
/// POST   /{id}/revert     -> revert_page
/// GET    /{id}/revisions  -> list_revisions
/// GET    /{id}/preview    -> preview_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list_pages).post(pages::create_page))
        .route(
            "/{id}",
            get(pages::get_page)
                .put(pages::save_page)
                .delete(pages::delete_page),
        )
        .route("/{id}/publish", post(pages::publish_page))
        .route("/{id}/revert", post(pages::revert_page))
        .route("/{id}/revisions", get(pages::list_revisions))
        .route("/{id}/preview", get(pages::preview_page))
}
