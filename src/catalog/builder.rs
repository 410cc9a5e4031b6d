//! Single-pass catalog construction from raw rows.
//!
//! Row order is semantically significant: it drives both the carry-forward
//! memory and the 1-based lesson numbering used for synthesized titles.
//! Malformed cells never abort a build — the worst outcome for a bad row
//! is silent discard or a defaulted field, and the builder always returns
//! a valid (possibly empty) catalog.

use sha2::{Digest, Sha256};

use crate::catalog::{columns, media, memory::RowMemory, Catalog};
use crate::domain::{LessonItem, LessonKind, MediaSource, RawRow};

/// Build a catalog from an ordered row sequence.
///
/// Pure: two builds from the same rows produce identical catalogs,
/// including the ids generated for document-only rows.
pub fn build_catalog(rows: &[RawRow]) -> Catalog {
    let mut catalog = Catalog::new();
    let mut memory = RowMemory::new();

    for (index, row) in rows.iter().enumerate() {
        memory.absorb(row);

        let video_link = columns::resolve(row, columns::VIDEO_LINK);
        let document_link = columns::resolve(row, columns::DOCUMENT_LINK);
        let slide_link = columns::resolve(row, columns::SLIDE_LINK);
        let mut title = columns::resolve(row, columns::TITLE);

        let media_ref = media::identify(&video_link);

        // Garbage collection: no media, no document, no title means the
        // row carries no usable content signal
        if media_ref.is_none() && document_link.is_empty() && title.is_empty() {
            continue;
        }

        // The live check reads the original title, before synthesis
        let is_live = media_ref
            .as_ref()
            .map(|m| m.source == MediaSource::Youtube)
            .unwrap_or(false)
            && media::live_hint(&video_link, &title);

        if title.is_empty() {
            title = format!("{} - Lesson {}", memory.subject_name, index + 1);
        }

        let (id, kind, source) = match &media_ref {
            Some(m) => (m.id.clone(), LessonKind::Video, Some(m.source)),
            None => (
                document_id(&memory.category, &memory.subject_id, &title, index),
                LessonKind::Document,
                None,
            ),
        };

        catalog.insert(LessonItem {
            id,
            kind,
            source,
            is_live,
            title,
            instructor: memory.instructor.clone(),
            subject_id: memory.subject_id.clone(),
            subject_name: memory.subject_name.clone(),
            category: memory.category.clone(),
            slide_link: media::normalize_doc_link(&slide_link),
            document_link: media::normalize_doc_link(&document_link),
        });
    }

    catalog
}

/// Deterministic id for a document-only row: `doc_` plus the first 8 bytes
/// of SHA-256 over the identifying fields. The row index keeps otherwise
/// identical rows distinct.
fn document_id(category: &str, subject_id: &str, title: &str, index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(category.as_bytes());
    hasher.update(b"\n");
    hasher.update(subject_id.as_bytes());
    hasher.update(b"\n");
    hasher.update(title.as_bytes());
    hasher.update(b"\n");
    hasher.update((index + 1).to_string().as_bytes());
    let digest = hasher.finalize();

    format!("doc_{}", hex::encode(&digest[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_row() {
        let rows = vec![RawRow::from_pairs([
            ("category", "Math"),
            ("code", "M1"),
            ("title", "Algebra"),
            ("link", "https://youtu.be/dQw4w9WgXcQ"),
        ])];

        let catalog = build_catalog(&rows);
        assert_eq!(catalog.len(), 1);

        let item = &catalog.items[0];
        assert_eq!(item.id, "dQw4w9WgXcQ");
        assert_eq!(item.kind, LessonKind::Video);
        assert_eq!(item.source, Some(MediaSource::Youtube));
        assert_eq!(item.category, "Math");
        assert_eq!(item.subject_id, "M1");
    }

    #[test]
    fn test_cloudflare_row() {
        let rows = vec![RawRow::from_pairs([(
            "link",
            "https://videodelivery.net/xyz123/manifest",
        )])];

        let catalog = build_catalog(&rows);
        let item = &catalog.items[0];
        assert_eq!(item.source, Some(MediaSource::Cloudflare));
        assert_eq!(item.id, "xyz123");
        assert_eq!(item.kind, LessonKind::Video);
    }

    #[test]
    fn test_document_row_with_synthesized_title() {
        let rows = vec![RawRow::from_pairs([(
            "sheet",
            "https://drive.google.com/file/d/ID/view?usp=sharing",
        )])];

        let catalog = build_catalog(&rows);
        let item = &catalog.items[0];
        assert_eq!(item.kind, LessonKind::Document);
        assert_eq!(item.source, None);
        assert!(item.id.starts_with("doc_"));
        assert_eq!(
            item.document_link.as_deref(),
            Some("https://drive.google.com/file/d/ID/preview")
        );
        // Synthesized from the default subject name and the 1-based index
        assert_eq!(item.title, "General Topics - Lesson 1");
    }

    #[test]
    fn test_structurally_empty_rows_are_discarded() {
        let rows = vec![
            RawRow::from_pairs([("category", "Math")]),
            RawRow::new(),
            RawRow::from_pairs([("link", "not a recognizable link")]),
        ];
        assert!(build_catalog(&rows).is_empty());
    }

    #[test]
    fn test_title_only_row_becomes_document() {
        let rows = vec![RawRow::from_pairs([("title", "Reading List")])];
        let catalog = build_catalog(&rows);

        let item = &catalog.items[0];
        assert_eq!(item.kind, LessonKind::Document);
        assert_eq!(item.document_link, None);
        assert_eq!(item.title, "Reading List");
    }

    #[test]
    fn test_carry_forward_across_rows() {
        let rows = vec![
            RawRow::from_pairs([
                ("category", "Math"),
                ("code", "M1"),
                ("title", "Algebra"),
                ("link", "https://youtu.be/ABCDEFGHIJK"),
            ]),
            RawRow::from_pairs([
                ("title", "Geometry"),
                ("link", "https://youtu.be/1234567890A"),
            ]),
        ];

        let catalog = build_catalog(&rows);
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].subjects.len(), 1);

        for item in &catalog.items {
            assert_eq!(item.category, "Math");
            assert_eq!(item.subject_id, "M1");
        }
    }

    #[test]
    fn test_default_category_when_never_supplied() {
        let rows = vec![RawRow::from_pairs([
            ("title", "Intro"),
            ("link", "https://youtu.be/dQw4w9WgXcQ"),
        ])];

        let catalog = build_catalog(&rows);
        assert_eq!(catalog.items[0].category, "General Course");
        assert_eq!(catalog.items[0].subject_id, "MISC");
        assert_eq!(catalog.items[0].instructor, "Admin");
    }

    #[test]
    fn test_live_flag_from_url_and_title() {
        let rows = vec![
            RawRow::from_pairs([("link", "https://www.youtube.com/live/dQw4w9WgXcQ")]),
            RawRow::from_pairs([
                ("link", "https://youtu.be/1234567890A"),
                ("title", "Physics LIVE session"),
            ]),
            RawRow::from_pairs([
                ("link", "https://youtu.be/1234567890B"),
                ("title", "Recorded class"),
            ]),
        ];

        let catalog = build_catalog(&rows);
        assert!(catalog.items[0].is_live);
        assert!(catalog.items[1].is_live);
        assert!(!catalog.items[2].is_live);
    }

    #[test]
    fn test_live_flag_never_set_for_cloudflare() {
        let rows = vec![RawRow::from_pairs([
            ("link", "https://videodelivery.net/xyz123/live/"),
            ("title", "Live chemistry"),
        ])];

        let catalog = build_catalog(&rows);
        assert_eq!(catalog.items[0].source, Some(MediaSource::Cloudflare));
        assert!(!catalog.items[0].is_live);
    }

    #[test]
    fn test_builds_are_deterministic() {
        let rows = vec![
            RawRow::from_pairs([
                ("category", "Math"),
                ("code", "M1"),
                ("link", "https://youtu.be/dQw4w9WgXcQ"),
            ]),
            RawRow::from_pairs([("sheet", "https://drive.google.com/file/d/X/view")]),
            RawRow::from_pairs([("title", "Notes")]),
        ];

        let first = build_catalog(&rows);
        let second = build_catalog(&rows);
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_ids_unique_for_identical_rows() {
        let rows = vec![
            RawRow::from_pairs([("sheet", "https://drive.google.com/file/d/X/view")]),
            RawRow::from_pairs([("sheet", "https://drive.google.com/file/d/X/view")]),
        ];

        let catalog = build_catalog(&rows);
        assert_eq!(catalog.len(), 2);
        assert_ne!(catalog.items[0].id, catalog.items[1].id);
    }

    #[test]
    fn test_slide_link_normalized() {
        let rows = vec![RawRow::from_pairs([
            ("link", "https://youtu.be/dQw4w9WgXcQ"),
            ("slide", "https://docs.google.com/presentation/d/S/edit#slide=1"),
        ])];

        let catalog = build_catalog(&rows);
        assert_eq!(
            catalog.items[0].slide_link.as_deref(),
            Some("https://docs.google.com/presentation/d/S/preview")
        );
    }
}
