//! Allow-list HTML sanitization for block content.
//!
//! Untrusted rich-text input is filtered against data-driven allow-lists
//! ([`ALLOWED_TAGS`], [`ALLOWED_SCHEMES`]) before persistence. Disallowed
//! tags are removed while their text content is retained; `script` and
//! `style` lose their contents as well. Surviving anchors are rewritten to
//! carry `rel="noopener noreferrer" target="_blank"` regardless of input.
//!
//! The filter is idempotent: sanitizing already-clean output produces
//! byte-identical output. [`sanitize_blocks`] applies the filter to every
//! HTML-format localized field of an untrusted block list.

use crate::blocks::{blocks_from_json, Block};
use crate::locale::TextFormat;

/// Tags that survive sanitization. Everything else is stripped.
pub const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "div", "em", "h2", "h3", "i", "li", "ol", "p", "pre",
    "span", "strong", "u", "ul",
];

/// URL schemes allowed on `a[href]`. Scheme-less relative URLs are also
/// allowed so in-site links survive.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Tags whose text content is dropped along with the tag itself.
const DROP_CONTENT_TAGS: &[&str] = &["script", "style"];

// ---------------------------------------------------------------------------
// Markup scanning
// ---------------------------------------------------------------------------

struct TagToken {
    closing: bool,
    name: String,
    attrs: Vec<(String, String)>,
}

enum Markup {
    /// A well-formed tag and the byte length it consumed.
    Tag { len: usize, tag: TagToken },
    /// An HTML comment, consumed whole.
    Comment(usize),
    /// `<!...>` / `<?...>` declarations, consumed whole.
    Directive(usize),
    /// A stray `<` that does not open markup; emit it as text.
    NotMarkup,
}

/// Parse the markup starting at `s` (which must begin with `<`).
///
/// Scanning is byte-based but stops only on ASCII bytes, which can never be
/// part of a multi-byte UTF-8 sequence, so all slice boundaries fall on
/// char boundaries.
fn parse_markup(s: &str) -> Markup {
    let bytes = s.as_bytes();
    if s.starts_with("<!--") {
        return Markup::Comment(match s.find("-->") {
            Some(p) => p + 3,
            None => s.len(),
        });
    }
    if s.starts_with("<!") || s.starts_with("<?") {
        return Markup::Directive(match s.find('>') {
            Some(p) => p + 1,
            None => s.len(),
        });
    }

    let mut i = 1;
    let closing = bytes.get(1) == Some(&b'/');
    if closing {
        i = 2;
    }

    let name_start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return Markup::NotMarkup;
    }
    let name = s[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            // unterminated tag: treat the `<` as literal text
            return Markup::NotMarkup;
        }
        if bytes[i] == b'>' {
            return Markup::Tag {
                len: i + 1,
                tag: TagToken {
                    closing,
                    name,
                    attrs,
                },
            };
        }

        let attr_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'>'
            && bytes[i] != b'/'
        {
            i += 1;
        }
        if i == attr_start {
            i += 1;
            continue;
        }
        let attr_name = s[attr_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = String::new();
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Markup::NotMarkup;
                }
                value = s[value_start..i].to_string();
                i += 1;
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = s[value_start..i].to_string();
            }
        }
        attrs.push((attr_name, value));
    }
}

/// Skip everything up to and including the closing tag `</name ...>`.
/// Returns the remainder, or `""` when no closing tag exists.
fn skip_past_closing<'a>(s: &'a str, name: &str) -> &'a str {
    let mut idx = 0;
    while let Some(off) = s[idx..].find("</") {
        let start = idx + off;
        let after = &s[start + 2..];
        let matches = after.len() >= name.len()
            && after[..name.len()].eq_ignore_ascii_case(name)
            && after[name.len()..]
                .bytes()
                .next()
                .is_none_or(|b| b == b'>' || b.is_ascii_whitespace());
        if matches {
            return match after.find('>') {
                Some(gt) => &after[gt + 1..],
                None => "",
            };
        }
        idx = start + 2;
    }
    ""
}

// ---------------------------------------------------------------------------
// Sanitizer
// ---------------------------------------------------------------------------

fn is_allowed_href(url: &str) -> bool {
    match url.find(':') {
        // scheme-less relative URL
        None => true,
        Some(colon) => {
            // a ':' after '/', '?', or '#' belongs to the path or query
            if url[..colon].contains(['/', '?', '#']) {
                return true;
            }
            let scheme = url[..colon].to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&scheme.as_str())
        }
    }
}

fn emit_tag(out: &mut String, tag: &TagToken) {
    if tag.closing {
        // br is void; a stray closing form is dropped
        if tag.name != "br" {
            out.push_str("</");
            out.push_str(&tag.name);
            out.push('>');
        }
        return;
    }
    if tag.name == "a" {
        let href = tag
            .attrs
            .iter()
            .find(|(name, _)| name == "href")
            .map(|(_, value)| value.trim())
            .filter(|value| is_allowed_href(value));
        match href {
            Some(href) => {
                out.push_str("<a href=\"");
                out.push_str(&href.replace('"', "&quot;"));
                out.push_str("\" rel=\"noopener noreferrer\" target=\"_blank\">");
            }
            None => out.push_str("<a rel=\"noopener noreferrer\" target=\"_blank\">"),
        }
        return;
    }
    // all other allowed tags are emitted bare; no attributes survive
    out.push('<');
    out.push_str(&tag.name);
    out.push('>');
}

/// Filter an untrusted HTML fragment against the allow-lists.
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];
        match parse_markup(tail) {
            Markup::Tag { len, tag } => {
                rest = &tail[len..];
                if !tag.closing && DROP_CONTENT_TAGS.contains(&tag.name.as_str()) {
                    rest = skip_past_closing(rest, &tag.name);
                    continue;
                }
                if ALLOWED_TAGS.contains(&tag.name.as_str()) {
                    emit_tag(&mut out, &tag);
                }
            }
            Markup::Comment(len) | Markup::Directive(len) => rest = &tail[len..],
            Markup::NotMarkup => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Reduce an HTML fragment to its text content. Tags, comments, and
/// `script`/`style` contents are removed; entities are left as-is.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];
        match parse_markup(tail) {
            Markup::Tag { len, tag } => {
                rest = &tail[len..];
                if !tag.closing && DROP_CONTENT_TAGS.contains(&tag.name.as_str()) {
                    rest = skip_past_closing(rest, &tag.name);
                }
            }
            Markup::Comment(len) | Markup::Directive(len) => rest = &tail[len..],
            Markup::NotMarkup => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Sanitize an untrusted block list from a save request.
///
/// Non-array input yields an empty list; malformed elements are dropped
/// (see [`blocks_from_json`]); every HTML-format localized field of the
/// survivors is filtered per-locale through [`sanitize_html`].
pub fn sanitize_blocks(raw: &serde_json::Value) -> Vec<Block> {
    let mut blocks = blocks_from_json(raw);
    for block in &mut blocks {
        for (value, format) in block.kind.localized_fields_mut() {
            if format == TextFormat::Html {
                for text in value.values_mut() {
                    *text = sanitize_html(text);
                }
            }
        }
    }
    blocks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
