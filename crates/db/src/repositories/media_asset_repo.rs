//! Repository for the `media_assets` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::media_asset::{CreateMediaAsset, MediaAsset};

const COLUMNS: &str = "id, url, original_name, mime_type, size_bytes, created_at";

/// CRUD operations for the media asset registry.
pub struct MediaAssetRepo;

impl MediaAssetRepo {
    /// Register an asset that the storage collaborator has already persisted.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaAsset,
    ) -> Result<MediaAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_assets (url, original_name, mime_type, size_bytes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(&input.url)
            .bind(&input.original_name)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_assets WHERE id = $1");
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all registered assets, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_assets ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, MediaAsset>(&query).fetch_all(pool).await
    }

    /// Remove an asset registration. The stored binary is the storage
    /// collaborator's concern. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
