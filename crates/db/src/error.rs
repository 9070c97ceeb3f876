//! Store-level error type for the revision state machine.

use vitrine_core::types::DbId;

/// Errors surfaced by page/revision repository operations.
///
/// Every operation that can fail with one of these conditions runs inside a
/// transaction and leaves the page's persisted state untouched on error.
#[derive(Debug, thiserror::Error)]
pub enum RevisionError {
    #[error("Page {0} not found")]
    PageNotFound(DbId),

    #[error("Page {0} has no draft revision to publish")]
    NoDraftToPublish(DbId),

    #[error("Revision {revision_id} does not belong to page {page_id}")]
    RevisionNotFound { page_id: DbId, revision_id: DbId },

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}
