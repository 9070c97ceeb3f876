//! Block content model and factory.
//!
//! A page revision's body is an ordered list of [`Block`]s. Each block is a
//! tagged union over a closed variant set, serialized as
//! `{"id": ..., "type": ..., "data": {...}}` so the editor frontend can
//! dispatch on the `type` string while the backend gets compile-time
//! exhaustiveness from the [`BlockKind`] enum: adding a variant forces every
//! renderer/sanitizer/translation `match` to be updated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::{Localized, TextFormat};

/// Generate a fresh opaque block id.
pub fn new_block_id() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Block envelope
// ---------------------------------------------------------------------------

/// One typed, independently addressable content unit inside a page revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Opaque unique id, generated by the factory. Never reused.
    pub id: String,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    /// Factory: a fresh block of the requested variant with a new id and all
    /// fields at their documented defaults.
    ///
    /// An unknown `type_tag` falls back to the rich-text variant rather than
    /// erroring, so the editor keeps working when it is newer than the
    /// backend's variant set.
    pub fn empty(type_tag: &str) -> Block {
        Block {
            id: new_block_id(),
            kind: BlockKind::empty(type_tag),
        }
    }

    /// Deep clone with a freshly generated top-level id. Nested list-item
    /// ids (gallery images, portfolio items, FAQ items, social links) are
    /// preserved; they are scoped to their containing list, not global.
    pub fn duplicate(&self) -> Block {
        Block {
            id: new_block_id(),
            kind: self.kind.clone(),
        }
    }
}

/// Lenient parse of an untrusted JSON block list.
///
/// Non-array input yields an empty list; elements that are not well-formed
/// blocks (wrong shape, unknown `type`, missing id) are silently dropped.
/// Dropping instead of erroring keeps one corrupted block from failing the
/// whole save or render.
pub fn blocks_from_json(raw: &serde_json::Value) -> Vec<Block> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value::<Block>(item.clone()).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// The closed set of block variants. `data`'s shape is fully determined by
/// the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum BlockKind {
    Hero(HeroData),
    RichText(RichTextData),
    Image(ImageData),
    ImageText(ImageTextData),
    Gallery(GalleryData),
    Video(VideoData),
    Portfolio(PortfolioData),
    Cta(CtaData),
    Faq(FaqData),
    Contact(ContactData),
    Social(SocialData),
    Chat(ChatData),
    Divider(DividerData),
    Spacer(SpacerData),
}

impl BlockKind {
    /// Empty instance of the variant named by `type_tag`; unknown tags fall
    /// back to rich text.
    pub fn empty(type_tag: &str) -> BlockKind {
        match type_tag {
            "hero" => BlockKind::Hero(HeroData::default()),
            "richText" => BlockKind::RichText(RichTextData::default()),
            "image" => BlockKind::Image(ImageData::default()),
            "imageText" => BlockKind::ImageText(ImageTextData::default()),
            "gallery" => BlockKind::Gallery(GalleryData::default()),
            "video" => BlockKind::Video(VideoData::default()),
            "portfolio" => BlockKind::Portfolio(PortfolioData::default()),
            "cta" => BlockKind::Cta(CtaData::default()),
            "faq" => BlockKind::Faq(FaqData::default()),
            "contact" => BlockKind::Contact(ContactData::default()),
            "social" => BlockKind::Social(SocialData::default()),
            "chat" => BlockKind::Chat(ChatData::default()),
            "divider" => BlockKind::Divider(DividerData::default()),
            "spacer" => BlockKind::Spacer(SpacerData::default()),
            _ => BlockKind::RichText(RichTextData::default()),
        }
    }

    /// The wire tag for this variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            BlockKind::Hero(_) => "hero",
            BlockKind::RichText(_) => "richText",
            BlockKind::Image(_) => "image",
            BlockKind::ImageText(_) => "imageText",
            BlockKind::Gallery(_) => "gallery",
            BlockKind::Video(_) => "video",
            BlockKind::Portfolio(_) => "portfolio",
            BlockKind::Cta(_) => "cta",
            BlockKind::Faq(_) => "faq",
            BlockKind::Contact(_) => "contact",
            BlockKind::Social(_) => "social",
            BlockKind::Chat(_) => "chat",
            BlockKind::Divider(_) => "divider",
            BlockKind::Spacer(_) => "spacer",
        }
    }

    /// Every localized field reachable from this variant, including nested
    /// list items, paired with its text format.
    ///
    /// The sanitizer and the translation fan-out both walk fields through
    /// this method, so they can never disagree about which fields carry HTML.
    pub fn localized_fields_mut(&mut self) -> Vec<(&mut Localized, TextFormat)> {
        use TextFormat::{Html, Text};
        match self {
            BlockKind::Hero(d) => vec![
                (&mut d.badge, Text),
                (&mut d.title, Text),
                (&mut d.subtitle, Text),
                (&mut d.description, Html),
                (&mut d.primary_cta.label, Text),
                (&mut d.secondary_cta.label, Text),
                (&mut d.image.alt, Text),
            ],
            BlockKind::RichText(d) => vec![(&mut d.content, Html)],
            BlockKind::Image(d) => vec![(&mut d.alt, Text), (&mut d.caption, Text)],
            BlockKind::ImageText(d) => {
                vec![(&mut d.image.alt, Text), (&mut d.content, Html)]
            }
            BlockKind::Gallery(d) => d
                .images
                .iter_mut()
                .flat_map(|img| [(&mut img.alt, Text), (&mut img.caption, Text)])
                .collect(),
            BlockKind::Video(d) => vec![(&mut d.title, Text)],
            BlockKind::Portfolio(d) => {
                let mut fields = vec![(&mut d.title, Text), (&mut d.subtitle, Text)];
                for item in &mut d.items {
                    fields.push((&mut item.title, Text));
                    fields.push((&mut item.description, Html));
                    fields.push((&mut item.link_label, Text));
                }
                fields
            }
            BlockKind::Cta(d) => vec![
                (&mut d.title, Text),
                (&mut d.description, Text),
                (&mut d.button_label, Text),
            ],
            BlockKind::Faq(d) => {
                let mut fields = vec![(&mut d.title, Text)];
                for item in &mut d.items {
                    fields.push((&mut item.question, Text));
                    fields.push((&mut item.answer, Html));
                }
                fields
            }
            BlockKind::Contact(d) => vec![
                (&mut d.title, Text),
                (&mut d.description, Text),
                (&mut d.address, Text),
            ],
            BlockKind::Social(d) => {
                let mut fields = vec![(&mut d.title, Text)];
                for link in &mut d.links {
                    fields.push((&mut link.label, Text));
                }
                fields
            }
            BlockKind::Chat(d) => vec![(&mut d.title, Text), (&mut d.description, Text)],
            BlockKind::Divider(_) | BlockKind::Spacer(_) => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// A labeled link, used for hero call-to-action buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaLink {
    pub label: Localized,
    pub url: String,
}

/// An image reference with localized alt text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRef {
    pub url: String,
    pub alt: Localized,
}

// ---------------------------------------------------------------------------
// Variant data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroData {
    pub badge: Localized,
    pub title: Localized,
    pub subtitle: Localized,
    /// Sanitized HTML.
    pub description: Localized,
    pub primary_cta: CtaLink,
    pub secondary_cta: CtaLink,
    pub image: ImageRef,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWidth {
    #[default]
    Full,
    Narrow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RichTextData {
    /// Sanitized HTML.
    pub content: Localized,
    pub width: TextWidth,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageData {
    pub url: String,
    pub alt: Localized,
    pub caption: Localized,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAlign {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageTextData {
    pub image: ImageRef,
    /// Sanitized HTML.
    pub content: Localized,
    pub align: ImageAlign,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub alt: Localized,
    pub caption: Localized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryData {
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoData {
    pub url: String,
    pub title: Localized,
}

/// How a portfolio item resolves its embedded media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioKind {
    Map,
    Video,
    #[default]
    Image,
    /// Never renders embedded media, regardless of other fields.
    Locked,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub kind: PortfolioKind,
    pub title: Localized,
    /// Sanitized HTML.
    pub description: Localized,
    pub embed_url: String,
    pub image_url: String,
    pub link_label: Localized,
    pub link_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioData {
    pub title: Localized,
    pub subtitle: Localized,
    pub items: Vec<PortfolioItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaData {
    pub title: Localized,
    pub description: Localized,
    pub button_label: Localized,
    pub button_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqItem {
    pub id: String,
    pub question: Localized,
    /// Sanitized HTML.
    pub answer: Localized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqData {
    pub title: Localized,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactData {
    pub title: Localized,
    pub description: Localized,
    pub email: String,
    pub phone: String,
    pub address: Localized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    pub label: Localized,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialData {
    pub title: Localized,
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatData {
    pub title: Localized,
    pub description: Localized,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Line,
    Space,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerData {
    pub style: DividerStyle,
}

/// Default spacer height in pixels.
pub const DEFAULT_SPACER_SIZE: i32 = 48;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerData {
    pub size: i32,
}

impl Default for SpacerData {
    fn default() -> Self {
        Self {
            size: DEFAULT_SPACER_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- factory -------------------------------------------------------------

    #[test]
    fn factory_generates_unique_ids() {
        let a = Block::empty("hero");
        let b = Block::empty("hero");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn factory_spacer_defaults() {
        let block = Block::empty("spacer");
        match block.kind {
            BlockKind::Spacer(ref d) => assert_eq!(d.size, DEFAULT_SPACER_SIZE),
            ref other => panic!("expected spacer, got {}", other.type_tag()),
        }
        assert!(!block.id.is_empty());
    }

    #[test]
    fn factory_unknown_type_falls_back_to_rich_text() {
        let block = Block::empty("carousel3000");
        assert_eq!(block.kind.type_tag(), "richText");
    }

    #[test]
    fn factory_hero_has_empty_localized_fields() {
        let mut block = Block::empty("hero");
        for (value, _) in block.kind.localized_fields_mut() {
            assert_eq!(value.get("en"), "");
        }
    }

    // -- duplication ---------------------------------------------------------

    #[test]
    fn duplicate_assigns_new_id_and_preserves_data() {
        let mut original = Block::empty("faq");
        if let BlockKind::Faq(ref mut d) = original.kind {
            d.items.push(FaqItem {
                id: "item-1".into(),
                question: Localized::empty().with("en", "Why?"),
                answer: Localized::empty().with("en", "<p>Because.</p>"),
            });
        }
        let copy = original.duplicate();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.kind, original.kind);
        // nested item ids are preserved as-is
        if let BlockKind::Faq(ref d) = copy.kind {
            assert_eq!(d.items[0].id, "item-1");
        }
    }

    // -- serde shape ---------------------------------------------------------

    #[test]
    fn serializes_as_id_type_data() {
        let block = Block {
            id: "b1".into(),
            kind: BlockKind::Spacer(SpacerData { size: 24 }),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "b1", "type": "spacer", "data": {"size": 24}})
        );
    }

    #[test]
    fn deserializes_image_text_variant() {
        let json = serde_json::json!({
            "id": "b2",
            "type": "imageText",
            "data": {
                "image": {"url": "/img/a.jpg", "alt": {"en": "A"}},
                "content": {"en": "<p>Hi</p>"},
                "align": "right"
            }
        });
        let block: Block = serde_json::from_value(json).unwrap();
        match block.kind {
            BlockKind::ImageText(d) => {
                assert_eq!(d.align, ImageAlign::Right);
                assert_eq!(d.image.url, "/img/a.jpg");
            }
            other => panic!("expected imageText, got {}", other.type_tag()),
        }
    }

    #[test]
    fn missing_data_fields_take_defaults() {
        let json = serde_json::json!({"id": "b3", "type": "richText", "data": {}});
        let block: Block = serde_json::from_value(json).unwrap();
        match block.kind {
            BlockKind::RichText(d) => assert_eq!(d.width, TextWidth::Full),
            other => panic!("expected richText, got {}", other.type_tag()),
        }
    }

    // -- lenient list parse --------------------------------------------------

    #[test]
    fn blocks_from_json_non_array_is_empty() {
        assert!(blocks_from_json(&serde_json::json!({"not": "a list"})).is_empty());
        assert!(blocks_from_json(&serde_json::json!(null)).is_empty());
    }

    #[test]
    fn blocks_from_json_drops_malformed_elements() {
        let raw = serde_json::json!([
            {"id": "ok", "type": "divider", "data": {"style": "space"}},
            42,
            null,
            {"id": "bad", "type": "teleporter", "data": {}},
            {"type": "divider", "data": {}},
        ]);
        let blocks = blocks_from_json(&raw);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, "ok");
    }

    // -- localized field walk ------------------------------------------------

    #[test]
    fn walk_covers_nested_list_items() {
        let mut block = Block::empty("portfolio");
        if let BlockKind::Portfolio(ref mut d) = block.kind {
            d.items.push(PortfolioItem::default());
            d.items.push(PortfolioItem::default());
        }
        // title + subtitle + 3 fields per item
        assert_eq!(block.kind.localized_fields_mut().len(), 2 + 2 * 3);
    }

    #[test]
    fn walk_marks_html_fields() {
        let mut block = Block::empty("hero");
        let formats: Vec<TextFormat> = block
            .kind
            .localized_fields_mut()
            .into_iter()
            .map(|(_, f)| f)
            .collect();
        assert_eq!(
            formats.iter().filter(|f| **f == TextFormat::Html).count(),
            1
        );
    }

    #[test]
    fn spacer_and_divider_have_no_localized_fields() {
        assert!(Block::empty("spacer").kind.localized_fields_mut().is_empty());
        assert!(Block::empty("divider").kind.localized_fields_mut().is_empty());
    }
}
