//! Route definitions for the public rendering boundary.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Public routes mounted at `/public`. Unauthenticated by design; only
/// published content is reachable here.
///
/// ```text
/// GET /pages/{slug}  -> render_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/pages/{slug}", get(public::render_page))
}
