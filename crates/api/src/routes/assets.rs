//! Route definitions for the media asset registry.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/api/v1/assets`.
///
/// ```text
/// GET    /       -> list_assets
/// POST   /       -> create_asset
/// DELETE /{id}   -> delete_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route("/{id}", delete(assets::delete_asset))
}
