//! Search, filter and sort over a session's document collection.
//!
//! Predicate classes (search term, category, tag set) combine with logical
//! AND; within the tag set a document matches if it carries any selected
//! tag. Sorting is a three-key comparator (upload date, title, file size)
//! with an ascending/descending toggle.

use crate::models::Document;
use serde::Deserialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Title,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

impl DocumentQuery {
    fn matches(&self, doc: &Document) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                doc.title.to_lowercase().contains(&term)
                    || doc.subject.to_lowercase().contains(&term)
                    || doc.description.to_lowercase().contains(&term)
                    || doc.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
        };

        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => doc.category == category,
        };

        let matches_tags =
            self.tags.is_empty() || self.tags.iter().any(|t| doc.tags.contains(t));

        matches_search && matches_category && matches_tags
    }

    fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ordering = match self.sort_by {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Size => a.file_size.cmp(&b.file_size),
            SortKey::Date => a.uploaded_at.cmp(&b.uploaded_at),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Filtered and sorted view of a collection. Always a subset of the input.
pub fn filter_and_sort(documents: &[Document], query: &DocumentQuery) -> Vec<Document> {
    let mut filtered: Vec<Document> = documents
        .iter()
        .filter(|doc| query.matches(doc))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| query.compare(a, b));
    filtered
}

/// Distinct categories across a collection, first-seen order.
pub fn distinct_categories(documents: &[Document]) -> Vec<String> {
    let mut categories = Vec::new();
    for doc in documents {
        if !categories.contains(&doc.category) {
            categories.push(doc.category.clone());
        }
    }
    categories
}

/// Distinct tags across a collection, first-seen order.
pub fn distinct_tags(documents: &[Document]) -> Vec<String> {
    let mut tags = Vec::new();
    for doc in documents {
        for tag in &doc.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}
