//! Page rendering.
//!
//! A pure function from an ordered block list, a locale, and a style palette
//! to an HTML document. No I/O, no shared state: blocks are read through the
//! localized fallback chain and dispatched per variant in list order. HTML
//! fields are inserted as-is — they were sanitized at save time — while every
//! plain-text field is escaped here.

use serde::{Deserialize, Serialize};

use crate::blocks::{
    Block, BlockKind, CtaLink, DividerStyle, GalleryData, HeroData, ImageAlign, PortfolioItem,
    PortfolioKind, TextWidth,
};
use crate::embed::youtube_embed_url;
use crate::locale::Localized;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Site color palette, injected as CSS custom properties on the rendered
/// document so the admin's appearance settings reach the public pages
/// without a stylesheet rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePalette {
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
}

impl Default for StylePalette {
    fn default() -> Self {
        Self {
            primary: "#1f6f5c".into(),
            accent: "#e8a33d".into(),
            background: "#fafaf7".into(),
            surface: "#ffffff".into(),
            text: "#1c1c1a".into(),
        }
    }
}

impl StylePalette {
    fn css_vars(&self) -> String {
        format!(
            "--vt-primary:{};--vt-accent:{};--vt-background:{};--vt-surface:{};--vt-text:{}",
            attr_escape(&self.primary),
            attr_escape(&self.accent),
            attr_escape(&self.background),
            attr_escape(&self.surface),
            attr_escape(&self.text),
        )
    }
}

// ---------------------------------------------------------------------------
// Escaping & placeholders
// ---------------------------------------------------------------------------

/// Escape text for HTML element content.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted HTML attribute value.
pub fn attr_escape(text: &str) -> String {
    html_escape(text).replace('"', "&quot;")
}

/// Locale-specific placeholder shown where media is missing or an embed URL
/// could not be resolved; a blank area would read as a rendering bug.
pub fn media_placeholder(locale: &str) -> &'static str {
    match locale {
        "de" => "Medien nicht verfügbar",
        "ru" => "Медиа недоступно",
        _ => "Media unavailable",
    }
}

fn placeholder_div(locale: &str) -> String {
    format!(
        "<div class=\"media-placeholder\">{}</div>",
        media_placeholder(locale)
    )
}

// ---------------------------------------------------------------------------
// Document entry points
// ---------------------------------------------------------------------------

/// Render an ordered block list for one locale into an HTML `<main>` element
/// carrying the palette's CSS custom properties.
pub fn render_blocks(blocks: &[Block], locale: &str, palette: &StylePalette) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<main class=\"page\" style=\"{}\">",
        palette.css_vars()
    ));
    for block in blocks {
        out.push_str(&render_block(block, locale));
    }
    out.push_str("</main>");
    out
}

/// Render a complete standalone HTML document for the public boundary.
pub fn render_document(
    title: &str,
    blocks: &[Block],
    locale: &str,
    palette: &StylePalette,
) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        attr_escape(locale),
        html_escape(title),
        render_blocks(blocks, locale, palette),
    )
}

// ---------------------------------------------------------------------------
// Per-variant fragments
// ---------------------------------------------------------------------------

fn render_block(block: &Block, locale: &str) -> String {
    match &block.kind {
        BlockKind::Hero(d) => render_hero(d, locale),
        BlockKind::RichText(d) => {
            let width = match d.width {
                TextWidth::Full => "full",
                TextWidth::Narrow => "narrow",
            };
            format!(
                "<section class=\"block block-rich-text width-{width}\">{}</section>",
                d.content.get(locale)
            )
        }
        BlockKind::Image(d) => {
            let figure = if d.url.is_empty() {
                placeholder_div(locale)
            } else {
                format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    attr_escape(&d.url),
                    attr_escape(d.alt.get(locale))
                )
            };
            let caption = text_elem("figcaption", &d.caption, locale);
            format!("<figure class=\"block block-image\">{figure}{caption}</figure>")
        }
        BlockKind::ImageText(d) => {
            let align = match d.align {
                ImageAlign::Left => "left",
                ImageAlign::Right => "right",
            };
            let image = if d.image.url.is_empty() {
                placeholder_div(locale)
            } else {
                format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    attr_escape(&d.image.url),
                    attr_escape(d.image.alt.get(locale))
                )
            };
            format!(
                "<section class=\"block block-image-text align-{align}\">{image}\
                 <div class=\"content\">{}</div></section>",
                d.content.get(locale)
            )
        }
        BlockKind::Gallery(d) => render_gallery(d, locale),
        BlockKind::Video(d) => {
            let title = text_elem("h2", &d.title, locale);
            let frame = match youtube_embed_url(&d.url) {
                Some(embed) => format!(
                    "<iframe src=\"{}\" loading=\"lazy\" allowfullscreen></iframe>",
                    attr_escape(&embed)
                ),
                None => placeholder_div(locale),
            };
            format!("<section class=\"block block-video\">{title}{frame}</section>")
        }
        BlockKind::Portfolio(d) => {
            let mut out = String::from("<section class=\"block block-portfolio\">");
            out.push_str(&text_elem("h2", &d.title, locale));
            out.push_str(&text_elem("p", &d.subtitle, locale));
            out.push_str("<div class=\"portfolio-items\">");
            for item in &d.items {
                out.push_str(&render_portfolio_item(item, locale));
            }
            out.push_str("</div></section>");
            out
        }
        BlockKind::Cta(d) => {
            let button = if d.button_url.is_empty() {
                String::new()
            } else {
                format!(
                    "<a class=\"button\" href=\"{}\">{}</a>",
                    attr_escape(&d.button_url),
                    html_escape(d.button_label.get(locale))
                )
            };
            format!(
                "<section class=\"block block-cta\">{}{}{button}</section>",
                text_elem("h2", &d.title, locale),
                text_elem("p", &d.description, locale),
            )
        }
        BlockKind::Faq(d) => {
            let mut out = String::from("<section class=\"block block-faq\">");
            out.push_str(&text_elem("h2", &d.title, locale));
            for item in &d.items {
                out.push_str(&format!(
                    "<details><summary>{}</summary><div class=\"answer\">{}</div></details>",
                    html_escape(item.question.get(locale)),
                    item.answer.get(locale),
                ));
            }
            out.push_str("</section>");
            out
        }
        BlockKind::Contact(d) => {
            let mut out = String::from("<section class=\"block block-contact\">");
            out.push_str(&text_elem("h2", &d.title, locale));
            out.push_str(&text_elem("p", &d.description, locale));
            if !d.email.is_empty() {
                out.push_str(&format!(
                    "<a href=\"mailto:{}\">{}</a>",
                    attr_escape(&d.email),
                    html_escape(&d.email)
                ));
            }
            if !d.phone.is_empty() {
                out.push_str(&format!("<span class=\"phone\">{}</span>", html_escape(&d.phone)));
            }
            out.push_str(&text_elem("address", &d.address, locale));
            out.push_str("</section>");
            out
        }
        BlockKind::Social(d) => {
            let mut out = String::from("<nav class=\"block block-social\">");
            out.push_str(&text_elem("h2", &d.title, locale));
            for link in &d.links {
                if link.url.is_empty() {
                    continue;
                }
                out.push_str(&format!(
                    "<a href=\"{}\" rel=\"noopener noreferrer\" target=\"_blank\" data-icon=\"{}\">{}</a>",
                    attr_escape(&link.url),
                    attr_escape(&link.icon),
                    html_escape(link.label.get(locale)),
                ));
            }
            out.push_str("</nav>");
            out
        }
        BlockKind::Chat(d) => format!(
            "<section class=\"block block-chat\">{}{}<div id=\"community-chat\"></div></section>",
            text_elem("h2", &d.title, locale),
            text_elem("p", &d.description, locale),
        ),
        BlockKind::Divider(d) => match d.style {
            DividerStyle::Line => "<hr class=\"block block-divider\">".to_string(),
            DividerStyle::Space => "<div class=\"block block-divider space\"></div>".to_string(),
        },
        BlockKind::Spacer(d) => format!(
            "<div class=\"block block-spacer\" style=\"height:{}px\"></div>",
            d.size
        ),
    }
}

/// `<tag>escaped text</tag>`, or nothing when the localized value resolves
/// empty — empty headings and paragraphs only add layout noise.
fn text_elem(tag: &str, value: &Localized, locale: &str) -> String {
    let text = value.get(locale);
    if text.is_empty() {
        return String::new();
    }
    format!("<{tag}>{}</{tag}>", html_escape(text))
}

fn render_hero(d: &HeroData, locale: &str) -> String {
    let mut out = String::from("<section class=\"block block-hero\">");
    let badge = d.badge.get(locale);
    if !badge.is_empty() {
        out.push_str(&format!("<span class=\"badge\">{}</span>", html_escape(badge)));
    }
    out.push_str(&text_elem("h1", &d.title, locale));
    out.push_str(&text_elem("p", &d.subtitle, locale));
    let description = d.description.get(locale);
    if !description.is_empty() {
        out.push_str(&format!("<div class=\"description\">{description}</div>"));
    }
    out.push_str(&render_cta_link(&d.primary_cta, "primary", locale));
    out.push_str(&render_cta_link(&d.secondary_cta, "secondary", locale));
    if !d.image.url.is_empty() {
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            attr_escape(&d.image.url),
            attr_escape(d.image.alt.get(locale))
        ));
    }
    out.push_str("</section>");
    out
}

fn render_cta_link(link: &CtaLink, class: &str, locale: &str) -> String {
    if link.url.is_empty() {
        return String::new();
    }
    format!(
        "<a class=\"button {class}\" href=\"{}\">{}</a>",
        attr_escape(&link.url),
        html_escape(link.label.get(locale)),
    )
}

fn render_gallery(d: &GalleryData, locale: &str) -> String {
    let mut out = String::from("<section class=\"block block-gallery\">");
    for image in &d.images {
        if image.url.is_empty() {
            out.push_str(&placeholder_div(locale));
            continue;
        }
        out.push_str(&format!(
            "<figure><img src=\"{}\" alt=\"{}\">{}</figure>",
            attr_escape(&image.url),
            attr_escape(image.alt.get(locale)),
            text_elem("figcaption", &image.caption, locale),
        ));
    }
    out.push_str("</section>");
    out
}

/// Embed resolution is a pure function of the item's kind and URLs; a
/// `locked` item never renders media, and anything unresolvable falls back
/// to the locale's placeholder.
fn render_portfolio_item(item: &PortfolioItem, locale: &str) -> String {
    let media = match item.kind {
        PortfolioKind::Locked => String::new(),
        PortfolioKind::Video => match youtube_embed_url(&item.embed_url) {
            Some(embed) => format!(
                "<iframe src=\"{}\" loading=\"lazy\" allowfullscreen></iframe>",
                attr_escape(&embed)
            ),
            None => placeholder_div(locale),
        },
        PortfolioKind::Map => {
            if item.embed_url.is_empty() {
                placeholder_div(locale)
            } else {
                format!(
                    "<iframe src=\"{}\" loading=\"lazy\"></iframe>",
                    attr_escape(&item.embed_url)
                )
            }
        }
        PortfolioKind::Image => {
            if item.image_url.is_empty() {
                placeholder_div(locale)
            } else {
                format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    attr_escape(&item.image_url),
                    attr_escape(item.title.get(locale))
                )
            }
        }
    };
    let link = if item.link_url.is_empty() {
        String::new()
    } else {
        format!(
            "<a href=\"{}\">{}</a>",
            attr_escape(&item.link_url),
            html_escape(item.link_label.get(locale)),
        )
    };
    let description = item.description.get(locale);
    let description = if description.is_empty() {
        String::new()
    } else {
        format!("<div class=\"description\">{description}</div>")
    };
    format!(
        "<article class=\"portfolio-item kind-{}\">{media}{}{description}{link}</article>",
        match item.kind {
            PortfolioKind::Map => "map",
            PortfolioKind::Video => "video",
            PortfolioKind::Image => "image",
            PortfolioKind::Locked => "locked",
        },
        text_elem("h3", &item.title, locale),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
