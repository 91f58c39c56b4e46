use std::{borrow::Borrow, cmp::Ordering};

use super::data::NoteMetadata;

const WORDS_PER_MINUTE: usize = 200;

/// Newest first.
pub(super) fn sort_note<T: Borrow<NoteMetadata>>(a: &T, b: &T) -> Ordering {
    b.borrow().date.cmp(&a.borrow().date)
}

/// Rough reading time of a markdown body, e.g. `"3 min read"`.
///
/// Never reports less than one minute.
pub fn estimate_reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
