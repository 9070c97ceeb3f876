//! Gap-fill translation fan-out.
//!
//! Given one locale's text, request machine translation into every other
//! configured locale whose current value is unreadable (empty, placeholder,
//! or mojibake — see `vitrine_core::locale::is_unreadable_as`). Requests run
//! concurrently; each target writes a disjoint key, so completion order
//! never affects the result. A failed request for one locale is recorded
//! and leaves that locale at its prior value without aborting siblings.

use futures::future::join_all;
use vitrine_core::blocks::Block;
use vitrine_core::locale::{is_unreadable_as, Localized, TextFormat, LOCALES};

use crate::client::{TranslateError, Translator};

/// One locale that could not be filled, with the error that stopped it.
#[derive(Debug)]
pub struct LocaleFailure {
    pub locale: String,
    pub error: TranslateError,
}

/// Result of a fan-out over one localized value: the (partially) filled
/// value plus the locales that still need attention.
#[derive(Debug)]
pub struct FanoutOutcome {
    pub value: Localized,
    pub failures: Vec<LocaleFailure>,
}

impl FanoutOutcome {
    /// Whether every targeted locale was filled.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fill the unreadable locales of `value` from `source_locale`'s text.
///
/// A trimmed-empty source is a no-op. Locales already holding readable
/// content are never overwritten.
pub async fn fill_missing_locales(
    translator: &dyn Translator,
    value: &Localized,
    source_locale: &str,
    format: TextFormat,
) -> FanoutOutcome {
    let source_text = value.raw(source_locale).trim().to_string();
    if source_text.is_empty() {
        return FanoutOutcome {
            value: value.clone(),
            failures: Vec::new(),
        };
    }

    let targets: Vec<&str> = LOCALES
        .iter()
        .copied()
        .filter(|locale| *locale != source_locale)
        .filter(|locale| is_unreadable_as(value.raw(locale), format))
        .collect();

    let results = join_all(targets.into_iter().map(|target| {
        let text = source_text.as_str();
        async move {
            (
                target,
                translator.translate(text, source_locale, target, format).await,
            )
        }
    }))
    .await;

    let mut next = value.clone();
    let mut failures = Vec::new();
    for (target, result) in results {
        match result {
            Ok(translated) => next.set(target, translated),
            Err(error) => {
                tracing::warn!(target_locale = target, error = %error, "Translation failed");
                failures.push(LocaleFailure {
                    locale: target.to_string(),
                    error,
                });
            }
        }
    }
    FanoutOutcome {
        value: next,
        failures,
    }
}

/// Fan out over every localized field of a block, nested list items
/// included. All field-level fan-outs run concurrently; the block is
/// reassembled only after the last one resolves. Returns the accumulated
/// per-locale failures across all fields.
pub async fn translate_block(
    translator: &dyn Translator,
    block: &mut Block,
    source_locale: &str,
) -> Vec<LocaleFailure> {
    let mut fields = block.kind.localized_fields_mut();
    let snapshots: Vec<(Localized, TextFormat)> = fields
        .iter()
        .map(|(value, format)| ((**value).clone(), *format))
        .collect();

    let outcomes = join_all(
        snapshots
            .iter()
            .map(|(value, format)| fill_missing_locales(translator, value, source_locale, *format)),
    )
    .await;

    let mut failures = Vec::new();
    for ((slot, _), outcome) in fields.iter_mut().zip(outcomes) {
        **slot = outcome.value;
        failures.extend(outcome.failures);
    }
    failures
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use vitrine_core::blocks::{BlockKind, FaqItem};

    use super::*;

    /// Records every requested target and answers `"{target}:{text}"`.
    #[derive(Default)]
    struct EchoTranslator {
        requests: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            _source: &str,
            target: &str,
            _format: TextFormat,
        ) -> Result<String, TranslateError> {
            self.requests.lock().unwrap().push(target.to_string());
            Ok(format!("{target}:{text}"))
        }
    }

    /// Fails for one locale, succeeds for the rest.
    struct FlakyTranslator {
        fail_target: &'static str,
    }

    #[async_trait]
    impl Translator for FlakyTranslator {
        async fn translate(
            &self,
            text: &str,
            _source: &str,
            target: &str,
            _format: TextFormat,
        ) -> Result<String, TranslateError> {
            if target == self.fail_target {
                Err(TranslateError::HttpStatus(502))
            } else {
                Ok(format!("{target}:{text}"))
            }
        }
    }

    #[tokio::test]
    async fn fills_only_unreadable_locales() {
        let translator = EchoTranslator::default();
        let value = Localized::empty().with("en", "Hello").with("ru", "???");

        let outcome = fill_missing_locales(&translator, &value, "en", TextFormat::Text).await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.value.raw("en"), "Hello");
        assert_eq!(outcome.value.raw("de"), "de:Hello");
        assert_eq!(outcome.value.raw("ru"), "ru:Hello");

        let mut requests = translator.requests.lock().unwrap().clone();
        requests.sort();
        assert_eq!(requests, vec!["de", "ru"]);
    }

    #[tokio::test]
    async fn readable_locales_are_never_overwritten() {
        let translator = EchoTranslator::default();
        let value = Localized::empty()
            .with("en", "Hello")
            .with("de", "Hallo von Hand");

        let outcome = fill_missing_locales(&translator, &value, "en", TextFormat::Text).await;

        assert_eq!(outcome.value.raw("de"), "Hallo von Hand");
        assert_eq!(translator.requests.lock().unwrap().as_slice(), ["ru"]);
    }

    #[tokio::test]
    async fn empty_source_is_a_no_op() {
        let translator = EchoTranslator::default();
        let value = Localized::empty().with("de", "Hallo");

        let outcome = fill_missing_locales(&translator, &value, "en", TextFormat::Text).await;

        assert_eq!(outcome.value, value);
        assert!(translator.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_siblings() {
        let translator = FlakyTranslator { fail_target: "de" };
        let value = Localized::empty().with("en", "Hello");

        let outcome = fill_missing_locales(&translator, &value, "en", TextFormat::Text).await;

        assert!(!outcome.is_complete());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].locale, "de");
        // the failed locale keeps its prior value, the sibling is filled
        assert_eq!(outcome.value.raw("de"), "");
        assert_eq!(outcome.value.raw("ru"), "ru:Hello");
    }

    #[tokio::test]
    async fn html_fields_are_checked_after_tag_stripping() {
        let translator = EchoTranslator::default();
        // markup-only content counts as missing; real content does not
        let value = Localized::empty()
            .with("en", "<p>Hello</p>")
            .with("de", "<p><br></p>")
            .with("ru", "<p>Привет</p>");

        let outcome = fill_missing_locales(&translator, &value, "en", TextFormat::Html).await;

        assert_eq!(outcome.value.raw("de"), "de:<p>Hello</p>");
        assert_eq!(outcome.value.raw("ru"), "<p>Привет</p>");
    }

    #[tokio::test]
    async fn block_walk_translates_nested_items() {
        let translator = EchoTranslator::default();
        let mut block = Block::empty("faq");
        if let BlockKind::Faq(ref mut d) = block.kind {
            d.title = Localized::empty().with("en", "FAQ");
            d.items.push(FaqItem {
                id: "i1".into(),
                question: Localized::empty().with("en", "Why?"),
                answer: Localized::empty().with("en", "<p>Because.</p>"),
            });
        }

        let failures = translate_block(&translator, &mut block, "en").await;
        assert!(failures.is_empty());

        if let BlockKind::Faq(ref d) = block.kind {
            assert_eq!(d.title.raw("de"), "de:FAQ");
            assert_eq!(d.items[0].question.raw("ru"), "ru:Why?");
            assert_eq!(d.items[0].answer.raw("de"), "de:<p>Because.</p>");
        } else {
            panic!("expected faq block");
        }
    }

    #[tokio::test]
    async fn block_walk_collects_failures_across_fields() {
        let translator = FlakyTranslator { fail_target: "ru" };
        let mut block = Block::empty("cta");
        if let BlockKind::Cta(ref mut d) = block.kind {
            d.title = Localized::empty().with("en", "Work with me");
            d.button_label = Localized::empty().with("en", "Get in touch");
        }

        let failures = translate_block(&translator, &mut block, "en").await;

        // one ru failure per non-empty source field
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| f.locale == "ru"));
        if let BlockKind::Cta(ref d) = block.kind {
            assert_eq!(d.title.raw("de"), "de:Work with me");
            assert_eq!(d.title.raw("ru"), "");
        } else {
            panic!("expected cta block");
        }
    }
}
