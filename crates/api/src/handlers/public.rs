//! Public rendering boundary.
//!
//! Resolves a slug to its published revision and renders it. Draft content
//! is never reachable here: a page without a published pointer is a 404,
//! exactly like a page that does not exist.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;
use vitrine_core::blocks::blocks_from_json;
use vitrine_core::render::render_document;
use vitrine_db::repositories::PageRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query params for public page rendering.
#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    /// Locale to render; defaults to `en`. Unknown values simply resolve
    /// through the fallback chain.
    pub locale: Option<String>,
}

/// GET /public/pages/:slug
///
/// Render the published revision of a page.
pub async fn render_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<RenderQuery>,
) -> AppResult<impl IntoResponse> {
    let (page, revision) = PageRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published page at '{slug}'")))?;

    let locale = query.locale.as_deref().unwrap_or("en");
    let blocks = blocks_from_json(&revision.blocks);
    let html = render_document(&revision.title, &blocks, locale, &state.config.palette);

    tracing::debug!(page_id = page.id, slug = %slug, locale, "Rendered public page");

    Ok(Html(html))
}
