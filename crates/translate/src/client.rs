//! HTTP client for the translation service.
//!
//! Speaks the LibreTranslate wire protocol: `POST {base}/translate` with
//! `{q, source, target, format}` returning `{"translatedText": ...}`.
//! Network failures and non-2xx responses surface as [`TranslateError`]
//! values, never panics, so one failed locale cannot take down a fan-out.

use std::time::Duration;

use async_trait::async_trait;
use vitrine_core::locale::TextFormat;

/// HTTP request timeout for a single translation attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for translation request failures.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Translation service returned HTTP {0}")]
    HttpStatus(u16),

    /// The service responded 2xx but the body was not the expected shape.
    #[error("Malformed response from translation service: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// The translation collaborator boundary.
///
/// `source` may be a locale code or `"auto"` for service-side detection.
/// Implementations must be cheap to call concurrently; the fan-out issues
/// one call per (text, target locale) pair.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
        format: TextFormat,
    ) -> Result<String, TranslateError>;
}

// ---------------------------------------------------------------------------
// HttpTranslator
// ---------------------------------------------------------------------------

/// Production [`Translator`] backed by a LibreTranslate-compatible service.
pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    /// Create a client for the service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
        format: TextFormat,
    ) -> Result<String, TranslateError> {
        let mut payload = serde_json::json!({
            "q": text,
            "source": source,
            "target": target,
            "format": match format {
                TextFormat::Text => "text",
                TextFormat::Html => "html",
            },
        });
        if let Some(key) = &self.api_key {
            payload["api_key"] = serde_json::Value::String(key.clone());
        }

        let url = format!("{}/translate", self.base_url);
        let response = self.client.post(&url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(TranslateError::HttpStatus(response.status().as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        body.get("translatedText")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| TranslateError::Malformed("missing translatedText field".into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
