//! Domain logic for the vitrine CMS.
//!
//! This crate has no internal dependencies and performs no I/O, so it can be
//! used by the repository layer, the API server, and the translation service
//! alike. It owns the localized value model, the block content model and its
//! factory, the HTML sanitizer, slug validation, embed-URL resolution, and
//! the page renderer.

pub mod blocks;
pub mod embed;
pub mod error;
pub mod locale;
pub mod render;
pub mod roles;
pub mod sanitize;
pub mod slug;
pub mod types;
