//! Machine-translation collaborator client and gap-fill fan-out.
//!
//! [`Translator`] abstracts the external translation service so the fan-out
//! logic (and its tests) are independent of the wire protocol;
//! [`HttpTranslator`] is the production implementation. The fan-out in
//! [`fanout`] fills only locales whose current content is unreadable — it
//! never overwrites human-authored text.

pub mod client;
pub mod fanout;

pub use client::{HttpTranslator, TranslateError, Translator};
pub use fanout::{fill_missing_locales, translate_block, FanoutOutcome, LocaleFailure};
