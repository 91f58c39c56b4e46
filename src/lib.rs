//! Markdown notes for the portfolio site.
//!
//! Notes live as `<id>.md` files with a YAML front-matter block. The
//! [`NoteRepository`] lists and loads them; the HTML it produces is
//! [`TrustedMarkup`], safe only because the notes directory is author-owned.

pub mod config;
pub mod date;
pub mod error;
pub mod export;
pub mod listing;
pub mod renderer;
pub mod repository;

pub use config::{Config, DateFallback};
pub use date::NoteDate;
pub use error::NoteError;
pub use listing::{all_tags, paginate, NoteQuery, Page};
pub use renderer::{render_markdown, TrustedMarkup};
pub use repository::{estimate_reading_time, Note, NoteId, NoteMetadata, NoteRepository};
