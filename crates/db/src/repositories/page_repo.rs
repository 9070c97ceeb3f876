//! Repository for the `pages` table and the draft/publish state machine.
//!
//! Pages move through create → save (new draft revision) → publish →
//! optional revert → delete. Revisions are append-only: every save and
//! revert inserts a new `page_revisions` row and repoints the page's draft
//! pointer; no revision row is ever mutated. Each mutating operation runs in
//! a transaction that first locks the page row with `SELECT ... FOR UPDATE`,
//! so concurrent saves against one page cannot interleave with pruning.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::error::RevisionError;
use crate::models::page::{CreatePage, Page, PageRevision};

/// Column list shared across page queries.
const PAGE_COLUMNS: &str =
    "id, slug, title, draft_revision_id, published_revision_id, created_at, updated_at";

/// Column list shared across revision queries.
const REVISION_COLUMNS: &str = "id, page_id, title, blocks, created_by, created_at";

/// How many most-recent revisions survive pruning, in addition to the
/// currently-published revision.
pub const REVISION_RETENTION: i64 = 10;

/// Provides CRUD and lifecycle operations for pages.
pub struct PageRepo;

impl PageRepo {
    // ── Reads ────────────────────────────────────────────────────────

    /// Find a page by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a page by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE slug = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all pages, most recently updated first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!("SELECT {PAGE_COLUMNS} FROM pages ORDER BY updated_at DESC, id DESC");
        sqlx::query_as::<_, Page>(&query).fetch_all(pool).await
    }

    /// Resolve a slug to its page and published revision for the public
    /// boundary. Returns `None` when the page does not exist or has never
    /// been published; draft content is not reachable through this path.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<(Page, PageRevision)>, sqlx::Error> {
        let Some(page) = Self::find_by_slug(pool, slug).await? else {
            return Ok(None);
        };
        let Some(published_id) = page.published_revision_id else {
            return Ok(None);
        };
        // The FK guarantees the pointer resolves; a missing row here is an
        // integrity violation and surfaces as RowNotFound.
        let query = format!("SELECT {REVISION_COLUMNS} FROM page_revisions WHERE id = $1");
        let revision = sqlx::query_as::<_, PageRevision>(&query)
            .bind(published_id)
            .fetch_one(pool)
            .await?;
        Ok(Some((page, revision)))
    }

    // ── Lifecycle transitions ────────────────────────────────────────

    /// Create a page together with its empty first revision, atomically.
    /// The draft pointer is set to the new revision; the published pointer
    /// stays unset. A duplicate slug surfaces as a unique-constraint error
    /// (`uq_pages_slug`).
    pub async fn create_with_first_revision(
        pool: &PgPool,
        input: &CreatePage,
        created_by: Option<DbId>,
    ) -> Result<(Page, PageRevision), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_page = format!(
            "INSERT INTO pages (slug, title) VALUES ($1, $2) RETURNING {PAGE_COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&insert_page)
            .bind(&input.slug)
            .bind(&input.title)
            .fetch_one(&mut *tx)
            .await?;

        let insert_revision = format!(
            "INSERT INTO page_revisions (page_id, title, blocks, created_by)
             VALUES ($1, $2, '[]'::jsonb, $3)
             RETURNING {REVISION_COLUMNS}"
        );
        let revision = sqlx::query_as::<_, PageRevision>(&insert_revision)
            .bind(page.id)
            .bind(&input.title)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        let update_pointer = format!(
            "UPDATE pages SET draft_revision_id = $2 WHERE id = $1 RETURNING {PAGE_COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&update_pointer)
            .bind(page.id)
            .bind(revision.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((page, revision))
    }

    /// Save a draft: insert a new revision with the given (already
    /// sanitized) blocks, repoint the draft pointer, update the title, then
    /// prune old revisions.
    ///
    /// The retained set is the [`REVISION_RETENTION`] most-recent revisions
    /// plus the published revision; everything else for this page is
    /// deleted. The fresh draft is by construction among the most recent.
    pub async fn save_draft(
        pool: &PgPool,
        page_id: DbId,
        title: Option<&str>,
        blocks: &serde_json::Value,
        created_by: Option<DbId>,
    ) -> Result<PageRevision, RevisionError> {
        let mut tx = pool.begin().await?;

        let page = Self::lock_page(&mut tx, page_id)
            .await?
            .ok_or(RevisionError::PageNotFound(page_id))?;
        let title = title.unwrap_or(&page.title);

        let insert_revision = format!(
            "INSERT INTO page_revisions (page_id, title, blocks, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {REVISION_COLUMNS}"
        );
        let revision = sqlx::query_as::<_, PageRevision>(&insert_revision)
            .bind(page_id)
            .bind(title)
            .bind(blocks)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE pages SET draft_revision_id = $2, title = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(page_id)
        .bind(revision.id)
        .bind(title)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM page_revisions
              WHERE page_id = $1
                AND ($2::BIGINT IS NULL OR id <> $2)
                AND id NOT IN (
                    SELECT id FROM page_revisions
                     WHERE page_id = $1
                     ORDER BY created_at DESC, id DESC
                     LIMIT $3
                )",
        )
        .bind(page_id)
        .bind(page.published_revision_id)
        .bind(REVISION_RETENTION)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(revision)
    }

    /// Publish the current draft: copies the draft pointer onto the
    /// published pointer. Fails with [`RevisionError::NoDraftToPublish`]
    /// when no draft exists; publishing twice with no intervening save is a
    /// state-level no-op.
    pub async fn publish(pool: &PgPool, page_id: DbId) -> Result<Page, RevisionError> {
        let mut tx = pool.begin().await?;

        let page = Self::lock_page(&mut tx, page_id)
            .await?
            .ok_or(RevisionError::PageNotFound(page_id))?;
        let Some(draft_id) = page.draft_revision_id else {
            return Err(RevisionError::NoDraftToPublish(page_id));
        };

        let update = format!(
            "UPDATE pages SET published_revision_id = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {PAGE_COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&update)
            .bind(page_id)
            .bind(draft_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(page)
    }

    /// Revert the draft to a prior revision. History is append-only: the
    /// target's title and blocks are copied into a *new* revision that
    /// becomes the draft; the target keeps its id and the published pointer
    /// is untouched. An explicit publish is still required to make the
    /// reverted content live.
    pub async fn revert(
        pool: &PgPool,
        page_id: DbId,
        revision_id: DbId,
        created_by: Option<DbId>,
    ) -> Result<PageRevision, RevisionError> {
        let mut tx = pool.begin().await?;

        Self::lock_page(&mut tx, page_id)
            .await?
            .ok_or(RevisionError::PageNotFound(page_id))?;

        let select_source = format!(
            "SELECT {REVISION_COLUMNS} FROM page_revisions WHERE id = $1 AND page_id = $2"
        );
        let source = sqlx::query_as::<_, PageRevision>(&select_source)
            .bind(revision_id)
            .bind(page_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RevisionError::RevisionNotFound {
                page_id,
                revision_id,
            })?;

        let insert_revision = format!(
            "INSERT INTO page_revisions (page_id, title, blocks, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {REVISION_COLUMNS}"
        );
        let revision = sqlx::query_as::<_, PageRevision>(&insert_revision)
            .bind(page_id)
            .bind(&source.title)
            .bind(&source.blocks)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE pages SET draft_revision_id = $2, title = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(page_id)
        .bind(revision.id)
        .bind(&source.title)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(revision)
    }

    /// Delete a page and, via cascade, all of its revisions. Returns `true`
    /// if a row was removed. Terminal; no undo.
    pub async fn delete(pool: &PgPool, page_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Clear the pointers before the cascade so the RESTRICT constraints
        // on them never see a revision disappear out from under a live page.
        sqlx::query(
            "UPDATE pages SET draft_revision_id = NULL, published_revision_id = NULL \
             WHERE id = $1",
        )
        .bind(page_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock the page row for the duration of the transaction.
    async fn lock_page(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        page_id: DbId,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Page>(&query)
            .bind(page_id)
            .fetch_optional(&mut **tx)
            .await
    }
}
