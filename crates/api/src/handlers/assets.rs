//! Handlers for the media asset registry.
//!
//! Upload mechanics live with the media storage collaborator; these
//! endpoints only register and list the resulting URLs so the editor's
//! media picker has an inventory to offer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::media_asset::CreateMediaAsset;
use vitrine_db::repositories::MediaAssetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assets
///
/// List registered assets, newest first.
pub async fn list_assets(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let assets = MediaAssetRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/v1/assets
///
/// Register an asset the storage collaborator has already persisted.
pub async fn create_asset(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateMediaAsset>,
) -> AppResult<impl IntoResponse> {
    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Asset URL must not be empty".into(),
        )));
    }

    let asset = MediaAssetRepo::create(&state.pool, &input).await?;

    tracing::info!(
        asset_id = asset.id,
        url = %asset.url,
        user_id = user.user_id,
        "Media asset registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// DELETE /api/v1/assets/:id
///
/// Remove an asset registration. Admin only.
pub async fn delete_asset(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = MediaAssetRepo::delete(&state.pool, asset_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MediaAsset",
            id: asset_id,
        }));
    }

    tracing::info!(asset_id, user_id = admin.user_id, "Media asset removed");

    Ok(StatusCode::NO_CONTENT)
}
