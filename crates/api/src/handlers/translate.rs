//! Handlers for the editor's translation fan-out.
//!
//! Both endpoints return 200 with the (possibly partially) filled result
//! plus the list of locales that failed, so the editor can mark exactly
//! which languages still need attention. Upstream failures never fail the
//! whole request.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::blocks::Block;
use vitrine_core::locale::{Localized, TextFormat};
use vitrine_translate::{fill_missing_locales, translate_block, LocaleFailure};

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for translating one localized value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateValueRequest {
    pub value: Localized,
    pub source_locale: String,
    pub format: TextFormat,
}

/// Request body for translating every field of one block.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBlockRequest {
    pub block: Block,
    pub source_locale: String,
}

/// A locale that could not be filled, with a display-safe error message.
#[derive(Debug, Serialize)]
pub struct FailedLocale {
    pub locale: String,
    pub error: String,
}

/// Response for value translation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateValueResponse {
    pub value: Localized,
    pub failed_locales: Vec<FailedLocale>,
}

/// Response for block translation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBlockResponse {
    pub block: Block,
    pub failed_locales: Vec<FailedLocale>,
}

fn to_failed(failures: Vec<LocaleFailure>) -> Vec<FailedLocale> {
    failures
        .into_iter()
        .map(|f| FailedLocale {
            locale: f.locale,
            error: f.error.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/translate
///
/// Fill the unreadable locales of one localized value from the active
/// editing locale's text.
pub async fn translate_value(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<TranslateValueRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = fill_missing_locales(
        state.translator.as_ref(),
        &input.value,
        &input.source_locale,
        input.format,
    )
    .await;

    tracing::info!(
        source_locale = %input.source_locale,
        failed = outcome.failures.len(),
        user_id = user.user_id,
        "Translated localized value",
    );

    Ok(Json(DataResponse {
        data: TranslateValueResponse {
            value: outcome.value,
            failed_locales: to_failed(outcome.failures),
        },
    }))
}

/// POST /api/v1/translate/block
///
/// Fill every localized field of a block, nested list items included.
pub async fn translate_block_fields(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<TranslateBlockRequest>,
) -> AppResult<impl IntoResponse> {
    let mut block = input.block;
    let failures =
        translate_block(state.translator.as_ref(), &mut block, &input.source_locale).await;

    tracing::info!(
        block_type = block.kind.type_tag(),
        source_locale = %input.source_locale,
        failed = failures.len(),
        user_id = user.user_id,
        "Translated block fields",
    );

    Ok(Json(DataResponse {
        data: TranslateBlockResponse {
            block,
            failed_locales: to_failed(failures),
        },
    }))
}
