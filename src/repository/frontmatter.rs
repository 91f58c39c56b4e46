//! Front-matter block at the top of a note.
//!
//! Every key is read on its own: a field with an unexpected shape is dropped
//! and picks up its default later, the rest of the block still counts.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;
use serde_yaml::Value;

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)??---[ \t]*(?:\r?\n|\z)(.*)\z").unwrap()
});

/// Recognised keys, `None` when missing or unusable.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub reading_time: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Returns the header (possibly empty) and the body.
pub(super) fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    match HEADER_PATTERN.captures(content) {
        Some(caps) => {
            let header = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            (Some(header), body)
        }
        None => (None, content),
    }
}

pub(super) fn parse(content: &str) -> (FrontMatter, &str) {
    let (header, body) = split(content);
    let front_matter = header.map(parse_header).unwrap_or_default();
    (front_matter, body)
}

fn parse_header(header: &str) -> FrontMatter {
    let value: Value = match serde_yaml::from_str(header) {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid front-matter ({e}). ignoring...");
            return FrontMatter::default();
        }
    };
    match &value {
        Value::Mapping(_) => {}
        Value::Null => return FrontMatter::default(),
        other => {
            warn!("Front-matter is not a mapping: {other:?}. ignoring...");
            return FrontMatter::default();
        }
    }

    FrontMatter {
        title: non_empty(value.get("title")),
        date: non_empty(value.get("date")),
        excerpt: non_empty(value.get("excerpt")),
        category: non_empty(value.get("category")),
        reading_time: value.get("readingTime").and_then(scalar),
        author: value.get("author").and_then(scalar),
        tags: value.get("tags").and_then(tags),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value.and_then(scalar).filter(|s| !s.is_empty())
}

fn tags(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Sequence(items) => Some(items.iter().filter_map(scalar).collect()),
        // `tags: design, ux`
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}
