//! Fuzzy column resolution against unreliable spreadsheet headers.
//!
//! Column names in the source sheet drift over time: `Subject ID`,
//! `subject_id`, `SubID`, and `sub-id` should all resolve to the same
//! logical field. Each field therefore carries an ordered alias list, and
//! matching compares only the alphanumeric characters of a header,
//! case-insensitively.

use crate::domain::RawRow;

/// Aliases for the category column, in priority order
pub const CATEGORY: &[&str] = &["category", "program", "class", "cat", "group"];

/// Aliases for the subject id column
pub const SUBJECT_ID: &[&str] = &["subjectid", "subid", "code", "s_code"];

/// Aliases for the subject name column
pub const SUBJECT_NAME: &[&str] = &["subjectname", "subject", "course", "c_name"];

/// Aliases for the instructor column
pub const INSTRUCTOR: &[&str] = &["instructor", "teacher", "author", "sir", "mentor"];

/// Aliases for the video link column
pub const VIDEO_LINK: &[&str] = &["youtubeid", "link", "url", "videolink", "video", "vlink"];

/// Aliases for the document link column
pub const DOCUMENT_LINK: &[&str] = &["sheetlink", "sheet", "pdf", "note", "doc", "drive", "file"];

/// Aliases for the slide link column
pub const SLIDE_LINK: &[&str] = &["slidelink", "slide", "ppt", "presentation"];

/// Aliases for the lesson title column
pub const TITLE: &[&str] = &["videotitle", "title", "topic", "chapter", "lesson", "name"];

/// Lower-cased alphanumeric characters of a header, without allocating.
fn significant_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().filter_map(|c| {
        let c = c.to_ascii_lowercase();
        c.is_ascii_alphanumeric().then_some(c)
    })
}

/// Check whether two headers are the same column name modulo case and
/// punctuation
fn keys_match(row_key: &str, candidate: &str) -> bool {
    significant_chars(row_key).eq(significant_chars(candidate))
}

/// Resolve a logical field against a row's actual keys.
///
/// Candidates are tried in priority order; the first row key whose
/// normalized form equals a normalized candidate wins. Returns the trimmed
/// cell text, or an empty string when no candidate matches or the matched
/// cell is blank.
pub fn resolve(row: &RawRow, candidates: &[&str]) -> String {
    for candidate in candidates {
        if let Some((_, value)) = row.iter().find(|(key, _)| keys_match(key, candidate)) {
            let text = RawRow::cell_text(value);
            if !text.is_empty() {
                return text.trim().to_string();
            }
        }
    }
    String::new()
}
