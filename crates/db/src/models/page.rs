//! Page and page-revision models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `pages` table.
///
/// The two revision pointers drive the page's lifecycle: a page is published
/// iff `published_revision_id` is set; it has unpublished changes iff the
/// pointers differ (or only the draft exists).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub draft_revision_id: Option<DbId>,
    pub published_revision_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Page {
    /// Whether the page is visible on the public boundary.
    pub fn is_published(&self) -> bool {
        self.published_revision_id.is_some()
    }

    /// Whether the draft differs from what the public sees.
    pub fn has_unpublished_changes(&self) -> bool {
        match (self.draft_revision_id, self.published_revision_id) {
            (Some(draft), Some(published)) => draft != published,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

/// A row from the `page_revisions` table.
///
/// Immutable once created: edits insert a new row and repoint the page's
/// draft pointer, never mutate an existing one. `blocks` holds the
/// sanitized block list as JSONB.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageRevision {
    pub id: DbId,
    pub page_id: DbId,
    pub title: String,
    pub blocks: serde_json::Value,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a new page.
#[derive(Debug, Deserialize)]
pub struct CreatePage {
    pub slug: String,
    pub title: String,
}

/// DTO for saving a draft. `blocks` is the raw, untrusted block list; the
/// handler sanitizes it before it reaches the repository.
#[derive(Debug, Deserialize)]
pub struct SavePage {
    pub title: Option<String>,
    pub blocks: serde_json::Value,
}

/// DTO for reverting the draft to a prior revision.
#[derive(Debug, Deserialize)]
pub struct RevertPage {
    pub revision_id: DbId,
}

/// Lightweight revision listing entry (blocks omitted).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageRevisionMeta {
    pub id: DbId,
    pub page_id: DbId,
    pub title: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
