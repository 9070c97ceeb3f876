//! Route assembly.
//!
//! Admin-facing editing routes live under `/api/v1`; the public rendering
//! boundary and the health probe are mounted separately in `main.rs` (and in
//! the integration-test app builder) so their paths stay unversioned.

use axum::Router;

use crate::state::AppState;

pub mod assets;
pub mod health;
pub mod pages;
pub mod public;
pub mod translate;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pages", pages::router())
        .nest("/translate", translate::router())
        .nest("/assets", assets::router())
}
