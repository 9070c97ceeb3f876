//! Localized value model.
//!
//! Every user-visible text field on a content block carries one value per
//! supported locale. [`Localized`] is the shared primitive: a locale-keyed
//! string map with a fixed fallback chain for reads and scoped, pure writes.
//! The readability predicate classifies a locale's text as real content
//! versus placeholder/corrupted/empty; the translation fan-out uses it to
//! decide which locales still need machine translation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sanitize::strip_tags;

/// Supported locale codes, in fallback priority order.
pub const LOCALES: &[&str] = &["en", "de", "ru"];

/// The locale content authors write in by default.
pub const DEFAULT_LOCALE: &str = "en";

/// Whether a localized value holds plain text or sanitized HTML.
///
/// The two flavors share [`Localized`]'s structure; the distinction matters
/// to the sanitizer (only HTML fields are filtered) and to the readability
/// check (HTML is stripped to text first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    Text,
    Html,
}

/// A string with one value per supported locale.
///
/// Serializes as a plain JSON object, e.g. `{"en": "Hello", "de": "", "ru": ""}`.
/// Keys outside [`LOCALES`] are tolerated on input and preserved, so legacy
/// payloads survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized(BTreeMap<String, String>);

impl Default for Localized {
    /// An empty value with every supported locale present as `""`.
    fn default() -> Self {
        Self(
            LOCALES
                .iter()
                .map(|l| (l.to_string(), String::new()))
                .collect(),
        )
    }
}

impl Localized {
    /// An empty value with every supported locale present as `""`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The raw value stored for `locale`, without fallback. Missing keys
    /// read as `""`.
    pub fn raw(&self, locale: &str) -> &str {
        self.0.get(locale).map(String::as_str).unwrap_or("")
    }

    /// The value for `locale`, falling back through [`LOCALES`] in priority
    /// order when that locale is empty or absent. Returns `""` only when
    /// every locale is empty.
    pub fn get(&self, locale: &str) -> &str {
        let direct = self.raw(locale);
        if !direct.is_empty() {
            return direct;
        }
        for fallback in LOCALES {
            let value = self.raw(fallback);
            if !value.is_empty() {
                return value;
            }
        }
        ""
    }

    /// Pure scoped write: a copy of `self` with only `locale` replaced.
    /// No other locale is touched and no fallback cascades on write.
    pub fn with(&self, locale: &str, text: impl Into<String>) -> Localized {
        let mut next = self.clone();
        next.set(locale, text);
        next
    }

    /// In-place variant of [`with`](Self::with).
    pub fn set(&mut self, locale: &str, text: impl Into<String>) {
        self.0.insert(locale.to_string(), text.into());
    }

    /// Mutable access to every stored locale value, for bulk transforms
    /// such as per-locale sanitization.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.0.values_mut()
    }

    /// Locale keys currently stored.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// True when `text` should be treated as missing content: empty or
/// whitespace-only, solely `?` characters, carrying the mis-decoded
/// `Ð`/`Ñ` marker characters typical of UTF-8 Cyrillic read as Latin-1,
/// or containing no letter or digit at all.
///
/// This is a heuristic tuned to Latin/Cyrillic content; legitimate text in
/// other scripts containing `Ð` or `Ñ` will be misclassified.
pub fn is_unreadable(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.chars().all(|c| c == '?') {
        return true;
    }
    if trimmed.contains('Ð') || trimmed.contains('Ñ') {
        return true;
    }
    !trimmed.chars().any(|c| c.is_alphanumeric())
}

/// Format-aware readability check: HTML values are reduced to their text
/// content before applying [`is_unreadable`].
pub fn is_unreadable_as(text: &str, format: TextFormat) -> bool {
    match format {
        TextFormat::Text => is_unreadable(text),
        TextFormat::Html => is_unreadable(&strip_tags(text)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
