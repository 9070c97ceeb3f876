//! Media asset registry models.
//!
//! Assets are reference-only: the CMS stores a publicly-resolvable URL plus
//! descriptive metadata, never the binary. Upload mechanics live with the
//! media storage collaborator.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `media_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaAsset {
    pub id: DbId,
    pub url: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// DTO for registering an already-stored asset by URL.
#[derive(Debug, Deserialize)]
pub struct CreateMediaAsset {
    pub url: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
}
