use std::path::PathBuf;

/// Failures surfaced by the note repository.
///
/// A missing notes directory or a missing note is not an error; those come
/// back as an empty list or `None`.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NoteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NoteError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = NoteError> = std::result::Result<T, E>;
