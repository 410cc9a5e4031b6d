//! Normalized lesson items produced by the catalog builder.
//!
//! A [`LessonItem`] is the durable unit of the system: its `id` is the join
//! key against watch-progress records and survives catalog rebuilds, so a
//! lesson watched under one catalog version stays watched even if upstream
//! data later changes its title or category.

use serde::{Deserialize, Serialize};

/// Kind of lesson content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    /// Streamed video class
    Video,

    /// Document resource (notes, question sheets, slides)
    Document,
}

impl std::fmt::Display for LessonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LessonKind::Video => write!(f, "video"),
            LessonKind::Document => write!(f, "document"),
        }
    }
}

/// Hosting provider for video lessons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    /// YouTube (any of the public URL shapes, or a bare video id)
    Youtube,

    /// Cloudflare Stream (videodelivery.net / cloudflarestream.com)
    Cloudflare,
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaSource::Youtube => write!(f, "youtube"),
            MediaSource::Cloudflare => write!(f, "cloudflare"),
        }
    }
}

/// A single normalized lesson.
///
/// Every field that names a grouping (category, subject) was inherited from
/// the row-memory cursor at build time and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonItem {
    /// Extracted media id, or a deterministic `doc_`-prefixed id for
    /// document-only rows
    pub id: String,

    /// Video or document
    pub kind: LessonKind,

    /// Hosting provider; absent for documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<MediaSource>,

    /// Live-stream marker (YouTube only)
    #[serde(default)]
    pub is_live: bool,

    /// Present or synthesized title
    pub title: String,

    /// Instructor name inherited from row memory
    pub instructor: String,

    /// Subject id inherited from row memory
    pub subject_id: String,

    /// Subject display name inherited from row memory
    pub subject_name: String,

    /// Category inherited from row memory
    pub category: String,

    /// Normalized slide link, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_link: Option<String>,

    /// Normalized document link, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_link: Option<String>,
}

impl LessonItem {
    /// Check if this is a playable video lesson
    pub fn is_video(&self) -> bool {
        self.kind == LessonKind::Video
    }

    /// Embeddable player URL for video lessons.
    ///
    /// Returns `None` for documents. The query shapes match what the
    /// providers' iframe players accept.
    pub fn embed_url(&self, autoplay: bool) -> Option<String> {
        match self.source? {
            MediaSource::Youtube => Some(format!(
                "https://www.youtube.com/embed/{}?autoplay={}&mute=0&rel=0&modestbranding=1&hl=en&cc_load_policy=0",
                self.id,
                if autoplay { 1 } else { 0 }
            )),
            MediaSource::Cloudflare => Some(format!(
                "https://iframe.videodelivery.net/{}?autoplay={}&muted=false&preload=true",
                self.id, autoplay
            )),
        }
    }

    /// Preview thumbnail URL, where the provider offers one
    pub fn thumbnail_url(&self) -> Option<String> {
        match self.source? {
            MediaSource::Youtube => Some(format!(
                "https://img.youtube.com/vi/{}/hqdefault.jpg",
                self.id
            )),
            MediaSource::Cloudflare => Some(format!(
                "https://videodelivery.net/{}/thumbnails/thumbnail.jpg",
                self.id
            )),
        }
    }
}
