//! Catalog normalization engine.
//!
//! Turns the loosely-structured row payload from the spreadsheet API into a
//! clean two-level grouping (category → subject → ordered lessons):
//!
//! - `columns`: fuzzy header matching against per-field alias lists
//! - `media`: video source detection and link normalization
//! - `memory`: merged-cell carry-forward state
//! - `builder`: the single-pass build over a row sequence
//!
//! A [`Catalog`] is an immutable value: each sync builds a complete new one
//! and replaces the previous wholesale, so readers never observe a
//! half-built catalog.

pub mod builder;
pub mod columns;
pub mod media;
pub mod memory;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::LessonItem;

pub use builder::build_catalog;
pub use media::MediaRef;
pub use memory::RowMemory;

/// The normalized course catalog.
///
/// `items` preserves row order across all categories (the order lessons
/// were listed in the sheet); `categories` groups the same items for
/// navigation, each in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// All lessons in row order
    pub items: Vec<LessonItem>,

    /// Category groups in first-seen order
    pub categories: Vec<CategoryGroup>,
}

/// One category with its subjects in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Category name as resolved from the sheet
    pub name: String,

    /// Subject groups in first-seen order
    pub subjects: Vec<SubjectGroup>,
}

/// One subject bucket with its ordered lesson list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectGroup {
    /// Subject id (join key within the category)
    pub id: String,

    /// Display name captured when the bucket was first created
    pub display_name: String,

    /// Lessons in row order
    pub items: Vec<LessonItem>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lessons across all categories
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no lessons
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a lesson by id
    pub fn get(&self, id: &str) -> Option<&LessonItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Id → lesson mapping for resumed-session lookups
    pub fn by_id(&self) -> HashMap<&str, &LessonItem> {
        self.items
            .iter()
            .map(|item| (item.id.as_str(), item))
            .collect()
    }

    /// Find a category group by name
    pub fn category(&self, name: &str) -> Option<&CategoryGroup> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Find a subject by id or display name, optionally scoped to a
    /// category (case-insensitive)
    pub fn find_subject(
        &self,
        subject: &str,
        category: Option<&str>,
    ) -> Option<(&CategoryGroup, &SubjectGroup)> {
        let subject_lower = subject.to_lowercase();

        self.categories
            .iter()
            .filter(|cat| {
                category
                    .map(|c| cat.name.to_lowercase() == c.to_lowercase())
                    .unwrap_or(true)
            })
            .find_map(|cat| {
                cat.subjects
                    .iter()
                    .find(|s| {
                        s.id.to_lowercase() == subject_lower
                            || s.display_name.to_lowercase() == subject_lower
                    })
                    .map(|s| (cat, s))
            })
    }

    /// Search lessons by query (case-insensitive substring over title,
    /// subject name, and category)
    pub fn search(&self, query: &str) -> Vec<&LessonItem> {
        let query_lower = query.to_lowercase();

        self.items
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&query_lower)
                    || item.subject_name.to_lowercase().contains(&query_lower)
                    || item.category.to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Insert a lesson under its (category, subject id) pair, creating the
    /// buckets on first use. The subject display name is captured once, at
    /// bucket creation.
    pub(crate) fn insert(&mut self, item: LessonItem) {
        let cat_pos = match self.categories.iter().position(|c| c.name == item.category) {
            Some(pos) => pos,
            None => {
                self.categories.push(CategoryGroup {
                    name: item.category.clone(),
                    subjects: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        let category = &mut self.categories[cat_pos];

        let subj_pos = match category.subjects.iter().position(|s| s.id == item.subject_id) {
            Some(pos) => pos,
            None => {
                category.subjects.push(SubjectGroup {
                    id: item.subject_id.clone(),
                    display_name: item.subject_name.clone(),
                    items: Vec::new(),
                });
                category.subjects.len() - 1
            }
        };

        category.subjects[subj_pos].items.push(item.clone());
        self.items.push(item);
    }
}

impl SubjectGroup {
    /// Check if any lesson in the subject is flagged live
    pub fn has_live(&self) -> bool {
        self.items.iter().any(|i| i.is_live)
    }
}
