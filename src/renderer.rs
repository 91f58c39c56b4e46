use std::fmt;

use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

/// HTML produced from author-controlled markdown.
///
/// Raw HTML embedded in a note is copied through without escaping, so the
/// string is only as safe as the files in the notes directory. Anything a site
/// visitor can submit must be sanitized before it is allowed anywhere near
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

pub fn render_markdown(body: &str) -> TrustedMarkup {
    let parser = Parser::new_ext(body, options());
    let mut body_html = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut body_html, parser);
    TrustedMarkup(body_html)
}
