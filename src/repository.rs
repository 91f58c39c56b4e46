//! Notes stored as `<id>.md` files in a single directory.

use std::{
    ffi::OsStr,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::{
    config::{Config, DateFallback},
    date::NoteDate,
    error::{NoteError, Result},
    renderer::render_markdown,
};

mod data;
mod frontmatter;
mod utils;

pub use data::{Note, NoteId, NoteMetadata};
pub use utils::estimate_reading_time;

use frontmatter::FrontMatter;
use utils::sort_note;

pub const NOTE_EXTENSION: &str = "md";

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_CATEGORY: &str = "General";

/// Read-only view over the notes directory.
///
/// Nothing is cached; each call goes back to the filesystem.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    config: Config,
}

impl NoteRepository {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notes_dir(&self) -> &Path {
        &self.config.notes_dir
    }

    /// Ids of every note, for route enumeration. Empty if the directory is
    /// missing.
    pub fn list_note_ids(&self) -> Result<Vec<NoteId>> {
        Ok(self
            .note_files()?
            .into_iter()
            .map(|(id, _)| NoteId { id })
            .collect())
    }

    /// Metadata of every note, newest first. Notes sharing a date keep file
    /// name order.
    pub fn list_notes_sorted(&self) -> Result<Vec<NoteMetadata>> {
        let mut notes = vec![];
        for (id, path) in self.note_files()? {
            let Some(content) = read_source(&path)? else {
                debug!("{path:?} disappeared while listing. skipping...");
                continue;
            };
            let (front_matter, _) = frontmatter::parse(&content);
            notes.push(self.metadata(id, &path, front_matter)?);
        }
        notes.sort_by(sort_note);
        info!("Loaded {} notes from {:?}", notes.len(), self.notes_dir());

        Ok(notes)
    }

    /// `Ok(None)` when no note has this id.
    pub fn get_note(&self, id: &str) -> Result<Option<Note>> {
        if !is_valid_id(id) {
            debug!("{id:?} cannot name a note. treating as not found");
            return Ok(None);
        }
        let path = self.note_path(id);
        let Some(content) = read_source(&path)? else {
            debug!("Note {id:?} not found at {path:?}");
            return Ok(None);
        };

        let (front_matter, body) = frontmatter::parse(&content);
        let meta = self.metadata(id.to_string(), &path, front_matter)?;
        let content_html = render_markdown(body);

        Ok(Some(Note {
            meta,
            content: body.to_string(),
            content_html,
        }))
    }

    fn note_path(&self, id: &str) -> PathBuf {
        self.notes_dir().join(format!("{id}.{NOTE_EXTENSION}"))
    }

    /// `(id, path)` of every note file, ordered by id.
    fn note_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let dir = self.notes_dir();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Notes directory({dir:?}) does not exist. ignoring...");
                return Ok(vec![]);
            }
            Err(e) => return Err(NoteError::io(dir, e)),
        };

        let mut files = vec![];
        for entry in entries {
            let path = entry.map_err(|e| NoteError::io(dir, e))?.path();
            if path.extension() != Some(OsStr::new(NOTE_EXTENSION)) {
                continue;
            }
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(NoteError::io(path, e)),
            }
            match path.file_stem().and_then(OsStr::to_str) {
                Some(id) => files.push((id.to_string(), path.clone())),
                None => warn!("Note file name is not valid UTF-8: {path:?}. skipping..."),
            }
        }
        files.sort();

        Ok(files)
    }

    fn metadata(&self, id: String, path: &Path, fm: FrontMatter) -> Result<NoteMetadata> {
        let date = match fm.date {
            Some(date) => NoteDate::new(date),
            None => self.fallback_date(path)?,
        };

        Ok(NoteMetadata {
            id,
            title: fm.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            date,
            excerpt: fm.excerpt.unwrap_or_default(),
            category: fm.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            reading_time: fm.reading_time,
            author: fm.author,
            tags: fm.tags.unwrap_or_default(),
        })
    }

    fn fallback_date(&self, path: &Path) -> Result<NoteDate> {
        match self.config.date_fallback {
            DateFallback::Now => Ok(NoteDate::now()),
            DateFallback::Modified => {
                let meta = fs::metadata(path).map_err(|e| NoteError::io(path, e))?;
                match meta.modified() {
                    Ok(modified) => Ok(NoteDate::from_system_time(modified)),
                    Err(e) => {
                        warn!("No modification time for {path:?} ({e}). using current time");
                        Ok(NoteDate::now())
                    }
                }
            }
        }
    }
}

/// Reads a note file. `None` when it does not exist or is not a regular file.
/// Invalid UTF-8 is replaced with U+FFFD rather than failing the read.
fn read_source(path: &Path) -> Result<Option<String>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(NoteError::io(path, e)),
    }
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(NoteError::io(path, e)),
    };
    match String::from_utf8(bytes) {
        Ok(content) => Ok(Some(content)),
        Err(e) => {
            warn!("{path:?} is not valid UTF-8. replacing invalid bytes");
            Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
        }
    }
}

/// Ids are bare file stems; anything that could walk out of the notes
/// directory never matches a note.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\', '\0'])
}
