use serde::Serialize;

use crate::{date::NoteDate, renderer::TrustedMarkup};

/// Route parameter for one note detail page.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NoteId {
    pub id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    /// File name without `.md`.
    pub id: String,
    pub title: String,
    pub date: NoteDate,
    pub excerpt: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(flatten)]
    pub meta: NoteMetadata,
    /// Markdown body as written, front-matter removed.
    pub content: String,
    pub content_html: TrustedMarkup,
}
