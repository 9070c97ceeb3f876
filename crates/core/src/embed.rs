//! YouTube URL canonicalization for portfolio video embeds.
//!
//! Editors paste whatever URL shape the YouTube UI gave them; the renderer
//! needs the one shape an `<iframe>` accepts. [`youtube_embed_url`] maps
//! watch, youtu.be, shorts, embed, playlist, channel, and handle URLs to a
//! canonical embed URL, and returns `None` for anything unparseable so the
//! caller can fall back to a placeholder.

use std::sync::OnceLock;

use regex::Regex;

fn video_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{6,}$").expect("valid video id regex"))
}

fn list_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid playlist id regex"))
}

fn handle_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]{3,}$").expect("valid handle regex"))
}

/// Strip scheme and `www.`/`m.` prefixes, returning `(host, path_and_query)`.
fn split_host(url: &str) -> Option<(&str, &str)> {
    let rest = url
        .trim()
        .strip_prefix("https://")
        .or_else(|| url.trim().strip_prefix("http://"))
        .or_else(|| url.trim().strip_prefix("//"))
        .unwrap_or(url.trim());
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.strip_prefix("m.").unwrap_or(rest);
    let (host, path) = match rest.find('/') {
        Some(slash) => (&rest[..slash], &rest[slash..]),
        None => (rest, "/"),
    };
    if host.is_empty() {
        return None;
    }
    Some((host, path))
}

/// Extract a query parameter value from `?a=b&c=d` style input.
fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == key).then_some(value)
    })
}

/// Resolve a pasted YouTube URL into its canonical embeddable form.
///
/// | Input shape | Result |
/// |---|---|
/// | `watch?v=ID`, `youtu.be/ID`, `shorts/ID`, `embed/ID` | `embed/ID` |
/// | `playlist?list=L` | `embed/videoseries?list=L` |
/// | `channel/UC...` | `embed/videoseries?list=UU...` (uploads playlist) |
/// | `@handle`, `c/NAME`, `user/NAME` | `embed?listType=user_uploads&list=NAME` |
///
/// Anything else — including non-YouTube hosts — yields `None`.
pub fn youtube_embed_url(raw: &str) -> Option<String> {
    let (host, path_and_query) = split_host(raw)?;
    let (path, query) = match path_and_query.split_once('?') {
        Some((p, q)) => (p, q),
        None => (path_and_query, ""),
    };
    let path = path.trim_end_matches('/');

    if host == "youtu.be" {
        let id = path.strip_prefix('/')?;
        return video_embed(id);
    }
    if host != "youtube.com" && host != "youtube-nocookie.com" {
        return None;
    }

    if let Some(handle) = path.strip_prefix("/@") {
        return uploads_embed(handle);
    }
    if let Some(id) = path.strip_prefix("/shorts/") {
        return video_embed(id);
    }
    if let Some(id) = path.strip_prefix("/embed/") {
        return video_embed(id);
    }
    if let Some(name) = path.strip_prefix("/c/") {
        return uploads_embed(name);
    }
    if let Some(name) = path.strip_prefix("/user/") {
        return uploads_embed(name);
    }
    if let Some(channel_id) = path.strip_prefix("/channel/") {
        // a channel's uploads playlist id is its UC id with a UU prefix
        let rest = channel_id.strip_prefix("UC")?;
        if rest.is_empty() || !list_id_re().is_match(rest) {
            return None;
        }
        return Some(format!(
            "https://www.youtube.com/embed/videoseries?list=UU{rest}"
        ));
    }
    match path {
        "/watch" => video_embed(query_param(query, "v")?),
        "/playlist" => {
            let list = query_param(query, "list")?;
            if !list_id_re().is_match(list) {
                return None;
            }
            Some(format!(
                "https://www.youtube.com/embed/videoseries?list={list}"
            ))
        }
        _ => None,
    }
}

fn video_embed(id: &str) -> Option<String> {
    if !video_id_re().is_match(id) {
        return None;
    }
    Some(format!("https://www.youtube.com/embed/{id}"))
}

fn uploads_embed(name: &str) -> Option<String> {
    if !handle_re().is_match(name) {
        return None;
    }
    Some(format!(
        "https://www.youtube.com/embed?listType=user_uploads&list={name}"
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url() {
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn watch_url_with_extra_params() {
        assert_eq!(
            youtube_embed_url("https://youtube.com/watch?t=10&v=dQw4w9WgXcQ&ab=x").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn short_link() {
        assert_eq!(
            youtube_embed_url("https://youtu.be/dQw4w9WgXcQ?t=42").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn shorts_url() {
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/shorts/dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn existing_embed_url_is_normalized() {
        assert_eq!(
            youtube_embed_url("https://m.youtube.com/embed/dQw4w9WgXcQ/").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn playlist_url() {
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/playlist?list=PLabc123").as_deref(),
            Some("https://www.youtube.com/embed/videoseries?list=PLabc123")
        );
    }

    #[test]
    fn channel_url_maps_to_uploads_playlist() {
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/channel/UCabcDEF123").as_deref(),
            Some("https://www.youtube.com/embed/videoseries?list=UUabcDEF123")
        );
    }

    #[test]
    fn handle_url() {
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/@somebody").as_deref(),
            Some("https://www.youtube.com/embed?listType=user_uploads&list=somebody")
        );
    }

    #[test]
    fn unparseable_urls_yield_none() {
        assert_eq!(youtube_embed_url(""), None);
        assert_eq!(youtube_embed_url("not a url"), None);
        assert_eq!(youtube_embed_url("https://vimeo.com/12345"), None);
        assert_eq!(youtube_embed_url("https://www.youtube.com/watch"), None);
        assert_eq!(youtube_embed_url("https://www.youtube.com/watch?v=!!"), None);
        assert_eq!(youtube_embed_url("https://www.youtube.com/channel/XXnope"), None);
    }
}
