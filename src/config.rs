use std::{fmt, path::PathBuf, str::FromStr};

pub const DEFAULT_NOTES_DIR: &str = "content/notes";
pub const DEFAULT_PER_PAGE: usize = 5;

/// Where a note's `date` comes from when its front-matter has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFallback {
    /// Last-modified time of the source file. Stable across builds.
    #[default]
    Modified,
    /// Wall-clock time of the read.
    Now,
}

impl FromStr for DateFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modified" => Ok(DateFallback::Modified),
            "now" => Ok(DateFallback::Now),
            _ => Err(format!("unknown date fallback: {s} (expected `modified` or `now`)")),
        }
    }
}

impl fmt::Display for DateFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateFallback::Modified => "modified",
            DateFallback::Now => "now",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub notes_dir: PathBuf,
    pub date_fallback: DateFallback,
    pub per_page: usize,
}

impl Config {
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_date_fallback(mut self, date_fallback: DateFallback) -> Self {
        self.date_fallback = date_fallback;
        self
    }

    /// Zero is bumped to one so pagination always makes progress.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: PathBuf::from(DEFAULT_NOTES_DIR),
            date_fallback: DateFallback::default(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}
