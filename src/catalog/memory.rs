//! Carry-forward state for merged-cell inheritance.
//!
//! The source spreadsheet merges cells vertically: a merged category or
//! subject cell only stores its value in the first row of the merge, and
//! every following row arrives with that cell empty. [`RowMemory`] replays
//! that convention — each build owns one cursor, updated in row order, and
//! empty cells inherit the last-seen value.

use crate::catalog::columns;
use crate::domain::RawRow;

/// Default category for rows that never supply one
pub const DEFAULT_CATEGORY: &str = "General Course";

/// Default subject id
pub const DEFAULT_SUBJECT_ID: &str = "MISC";

/// Default subject display name
pub const DEFAULT_SUBJECT_NAME: &str = "General Topics";

/// Default instructor
pub const DEFAULT_INSTRUCTOR: &str = "Admin";

/// Mutable cursor holding the last-seen grouping values during one build.
///
/// Never shared across builds; the builder allocates a fresh instance per
/// pass.
#[derive(Debug, Clone)]
pub struct RowMemory {
    /// Last-seen category
    pub category: String,

    /// Last-seen subject id
    pub subject_id: String,

    /// Last-seen subject display name
    pub subject_name: String,

    /// Last-seen instructor
    pub instructor: String,

    // Whether any row has recorded a subject name (explicitly or via the
    // id-seeding fallback); gates the fallback to its first occurrence.
    name_recorded: bool,
}

impl Default for RowMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl RowMemory {
    /// Create a cursor holding the fixed defaults
    pub fn new() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            subject_id: DEFAULT_SUBJECT_ID.to_string(),
            subject_name: DEFAULT_SUBJECT_NAME.to_string(),
            instructor: DEFAULT_INSTRUCTOR.to_string(),
            name_recorded: false,
        }
    }

    /// Fold one row into the cursor.
    ///
    /// Non-empty resolved values overwrite; empty cells leave the previous
    /// value in place. A row that supplies a subject id but no subject name
    /// seeds the name from the id, once, until a real name shows up.
    pub fn absorb(&mut self, row: &RawRow) {
        let category = columns::resolve(row, columns::CATEGORY);
        if !category.is_empty() {
            self.category = category;
        }

        let subject_id = columns::resolve(row, columns::SUBJECT_ID);
        if !subject_id.is_empty() {
            self.subject_id = subject_id.clone();
        }

        let subject_name = columns::resolve(row, columns::SUBJECT_NAME);
        if !subject_name.is_empty() {
            self.subject_name = subject_name;
            self.name_recorded = true;
        } else if !subject_id.is_empty() && !self.name_recorded {
            // First-occurrence fallback: a subject with an id but no name
            // yet displays as its id
            self.subject_name = subject_id;
            self.name_recorded = true;
        }

        let instructor = columns::resolve(row, columns::INSTRUCTOR);
        if !instructor.is_empty() {
            self.instructor = instructor;
        }
    }
}
