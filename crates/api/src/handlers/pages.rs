//! Handlers for the page editor: CRUD plus the draft/publish/revert
//! lifecycle and draft preview.
//!
//! Save payloads are untrusted: the block list is sanitized here before the
//! repository persists it as a new revision. Reads and edits require the
//! editor role; deleting a page requires admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::blocks::blocks_from_json;
use vitrine_core::error::CoreError;
use vitrine_core::render::render_document;
use vitrine_core::sanitize::sanitize_blocks;
use vitrine_core::slug::{validate_slug, validate_title};
use vitrine_core::types::DbId;
use vitrine_db::models::page::{CreatePage, Page, PageRevision, RevertPage, SavePage};
use vitrine_db::repositories::{PageRepo, PageRevisionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A page together with its draft revision, as the editor loads it.
#[derive(Debug, Serialize)]
pub struct PageDetail {
    pub page: Page,
    pub draft: Option<PageRevision>,
}

/// Query params for draft preview rendering.
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Locale to render; defaults to `en`.
    pub locale: Option<String>,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/pages
///
/// List all pages, most recently updated first.
pub async fn list_pages(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pages = PageRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// POST /api/v1/pages
///
/// Create a page with an empty first draft revision.
pub async fn create_page(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&input.slug)?;
    validate_title(&input.title)?;

    let (page, draft) =
        PageRepo::create_with_first_revision(&state.pool, &input, Some(user.user_id)).await?;

    tracing::info!(
        page_id = page.id,
        slug = %page.slug,
        user_id = user.user_id,
        "Page created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PageDetail {
                page,
                draft: Some(draft),
            },
        }),
    ))
}

/// GET /api/v1/pages/:id
///
/// Retrieve a page and its draft revision for editing.
pub async fn get_page(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_id(&state.pool, page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }))?;

    let draft = match page.draft_revision_id {
        Some(revision_id) => PageRevisionRepo::find_by_id(&state.pool, revision_id).await?,
        None => None,
    };

    Ok(Json(DataResponse {
        data: PageDetail { page, draft },
    }))
}

/// PUT /api/v1/pages/:id
///
/// Save the editor's block list as a new draft revision. The incoming
/// blocks are sanitized; malformed entries are dropped rather than failing
/// the save.
pub async fn save_page(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<SavePage>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }

    let blocks = sanitize_blocks(&input.blocks);
    let blocks_json = serde_json::to_value(&blocks)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize blocks: {e}")))?;

    let revision = PageRepo::save_draft(
        &state.pool,
        page_id,
        input.title.as_deref(),
        &blocks_json,
        Some(user.user_id),
    )
    .await?;

    tracing::info!(
        page_id,
        revision_id = revision.id,
        block_count = blocks.len(),
        user_id = user.user_id,
        "Draft saved",
    );

    Ok(Json(DataResponse { data: revision }))
}

/// DELETE /api/v1/pages/:id
///
/// Delete a page and all of its revisions. Admin only; no undo.
pub async fn delete_page(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PageRepo::delete(&state.pool, page_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }));
    }

    tracing::info!(page_id, user_id = admin.user_id, "Page deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/pages/:id/publish
///
/// Make the current draft live. Fails with 412 when the page has no draft.
pub async fn publish_page(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::publish(&state.pool, page_id).await?;

    tracing::info!(
        page_id,
        revision_id = page.published_revision_id,
        user_id = user.user_id,
        "Page published",
    );

    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/pages/:id/revert
///
/// Stage a prior revision's content as a new draft. The published pointer
/// is untouched; publishing the staged draft is a separate, explicit step.
pub async fn revert_page(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<RevertPage>,
) -> AppResult<impl IntoResponse> {
    let revision =
        PageRepo::revert(&state.pool, page_id, input.revision_id, Some(user.user_id)).await?;

    tracing::info!(
        page_id,
        source_revision_id = input.revision_id,
        draft_revision_id = revision.id,
        user_id = user.user_id,
        "Draft reverted to prior revision",
    );

    Ok(Json(DataResponse { data: revision }))
}

/// GET /api/v1/pages/:id/revisions
///
/// Revision history for a page, newest first.
pub async fn list_revisions(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // 404 for unknown pages instead of an empty history
    PageRepo::find_by_id(&state.pool, page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }))?;

    let revisions = PageRevisionRepo::list_for_page(&state.pool, page_id).await?;
    Ok(Json(DataResponse { data: revisions }))
}

/// GET /api/v1/pages/:id/preview
///
/// Render the draft revision as the public boundary would, for the editor's
/// preview pane. Requires authentication; drafts stay off the public paths.
pub async fn preview_page(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Query(query): Query<PreviewQuery>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_id(&state.pool, page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }))?;

    let Some(draft_id) = page.draft_revision_id else {
        return Err(AppError::NotFound(format!(
            "Page {page_id} has no draft revision"
        )));
    };
    let draft = PageRevisionRepo::find_by_id(&state.pool, draft_id)
        .await?
        .ok_or(AppError::InternalError(format!(
            "Draft pointer of page {page_id} is dangling"
        )))?;

    let locale = query.locale.as_deref().unwrap_or("en");
    let blocks = blocks_from_json(&draft.blocks);
    let html = render_document(&draft.title, &blocks, locale, &state.config.palette);
    Ok(Html(html))
}
