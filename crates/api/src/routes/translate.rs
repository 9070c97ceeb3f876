//! Route definitions for the translation fan-out.

use axum::routing::post;
use axum::Router;

use crate::handlers::translate;
use crate::state::AppState;

/// Translation routes mounted at `/api/v1/translate`.
///
/// ```text
/// POST /        -> translate_value
/// POST /block   -> translate_block_fields
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(translate::translate_value))
        .route("/block", post(translate::translate_block_fields))
}
