//! Media source detection over heterogeneous URL shapes.
//!
//! Two detectors run in fixed priority order: the Cloudflare Stream check
//! comes first so that generic video-id extraction cannot misfire on a
//! provider URL that happens to contain a look-alike segment. A provider
//! domain without an extractable id counts as "no media found", never as
//! an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::MediaSource;

static CLOUDFLARE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:videodelivery\.net/|cloudflarestream\.com/)([\w-]+)").expect("valid regex")
});

// One alternation covers short-link, watch-query, embed, live and shorts
// forms; the capture stops at the first query/fragment delimiter.
static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=|live/|shorts/)([^#&?]*)")
        .expect("valid regex")
});

static VIEW_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/view.*").expect("valid regex"));

static EDIT_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/edit.*").expect("valid regex"));

/// A recognized video reference: hosting provider plus stable media id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// Hosting provider
    pub source: MediaSource,

    /// Provider-scoped media id
    pub id: String,
}

/// Classify a URL as a video reference.
///
/// Returns `None` for empty input, unrecognized shapes, and provider URLs
/// whose id segment cannot be extracted.
pub fn identify(url: &str) -> Option<MediaRef> {
    if url.is_empty() {
        return None;
    }

    if let Some(id) = extract_cloudflare_id(url) {
        return Some(MediaRef {
            source: MediaSource::Cloudflare,
            id,
        });
    }

    extract_youtube_id(url).map(|id| MediaRef {
        source: MediaSource::Youtube,
        id,
    })
}

/// Extract a Cloudflare Stream id from a videodelivery.net or
/// cloudflarestream.com URL
pub fn extract_cloudflare_id(url: &str) -> Option<String> {
    if !url.contains("cloudflare") && !url.contains("videodelivery") {
        return None;
    }

    CLOUDFLARE_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Extract a YouTube video id from any of the public URL shapes.
///
/// A bare 11-character string is accepted as an id itself (the sheet
/// sometimes carries raw ids instead of links).
pub fn extract_youtube_id(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    if let Some(caps) = YOUTUBE_ID_RE.captures(url) {
        let id = &caps[1];
        if id.chars().count() >= 11 {
            return Some(id.to_string());
        }
    }

    if url.chars().count() == 11 {
        return Some(url.to_string());
    }

    None
}

/// Live-stream hint: the URL carries a live path segment, or the title
/// mentions "live" in any casing
pub fn live_hint(url: &str, title: &str) -> bool {
    url.contains("/live/") || title.to_lowercase().contains("live")
}

/// Normalize a document link for embeddable viewing.
///
/// A `/view…` or `/edit…` suffix becomes `/preview`; already-normalized
/// and suffix-free links pass through unchanged. Empty input maps to
/// `None`.
pub fn normalize_doc_link(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let normalized = VIEW_SUFFIX_RE.replace(url, "/preview");
    let normalized = EDIT_SUFFIX_RE.replace(&normalized, "/preview");
    Some(normalized.into_owned())
}

/// The download form of a normalized document link (`/preview` → `/view`)
pub fn download_form(url: &str) -> String {
    url.replacen("/preview", "/view", 1)
}
