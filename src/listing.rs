//! Filtering and paging of an already sorted note listing.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::repository::NoteMetadata;

/// Every distinct tag, sorted.
pub fn all_tags(notes: &[NoteMetadata]) -> Vec<String> {
    notes
        .iter()
        .flat_map(|n| n.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Tag filter plus free-text search. The default query matches everything.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl NoteQuery {
    pub fn matches(&self, note: &NoteMetadata) -> bool {
        let matches_tag = self
            .tag
            .as_ref()
            .map_or(true, |tag| note.tags.iter().any(|t| t == tag));

        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                note.title.to_lowercase().contains(&term)
                    || note.excerpt.to_lowercase().contains(&term)
                    || note.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
        };

        matches_tag && matches_search
    }

    /// Keeps the listing order.
    pub fn filter<'a>(&self, notes: &'a [NoteMetadata]) -> Vec<&'a NoteMetadata> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}

/// One page of a listing. `page` is 1-based.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Page 0 is read as page 1 and `per_page` 0 as 1. A page past the end is
/// empty but still reports the totals.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_items = items.len();
    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    Page {
        items: &items[start..end],
        page,
        per_page,
        total_items,
        total_pages: total_items.div_ceil(per_page),
    }
}
