//! Repository for the `page_revisions` table.
//!
//! Revisions are written exclusively through [`PageRepo`]'s lifecycle
//! transitions; this repository only reads them.
//!
//! [`PageRepo`]: crate::repositories::PageRepo

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::page::{PageRevision, PageRevisionMeta};

const REVISION_COLUMNS: &str = "id, page_id, title, blocks, created_by, created_at";

/// Read operations over page revisions.
pub struct PageRevisionRepo;

impl PageRevisionRepo {
    /// Find a revision by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PageRevision>, sqlx::Error> {
        let query = format!("SELECT {REVISION_COLUMNS} FROM page_revisions WHERE id = $1");
        sqlx::query_as::<_, PageRevision>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a revision scoped to its owning page.
    pub async fn find_for_page(
        pool: &PgPool,
        page_id: DbId,
        revision_id: DbId,
    ) -> Result<Option<PageRevision>, sqlx::Error> {
        let query = format!(
            "SELECT {REVISION_COLUMNS} FROM page_revisions WHERE id = $1 AND page_id = $2"
        );
        sqlx::query_as::<_, PageRevision>(&query)
            .bind(revision_id)
            .bind(page_id)
            .fetch_optional(pool)
            .await
    }

    /// List revision metadata for a page, newest first. Blocks are omitted;
    /// the history view only needs who/when/what-title.
    pub async fn list_for_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<PageRevisionMeta>, sqlx::Error> {
        sqlx::query_as::<_, PageRevisionMeta>(
            "SELECT id, page_id, title, created_by, created_at FROM page_revisions \
             WHERE page_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(page_id)
        .fetch_all(pool)
        .await
    }

    /// Count the revisions currently retained for a page.
    pub async fn count_for_page(pool: &PgPool, page_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM page_revisions WHERE page_id = $1")
                .bind(page_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
