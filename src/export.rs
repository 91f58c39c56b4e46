//! Dumps the repository as JSON files for a static-generation step.
//!
//! Layout of `out_dir` (recreated on every run):
//!
//! ```text
//! ids.json          [{"id": ...}, ...]
//! notes.json        metadata, newest first
//! tags.json         distinct tags, sorted
//! notes/<id>.json   full note including contentHtml
//! ```

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{bail, Context};
use log::{debug, info};
use serde::Serialize;

use crate::{listing::all_tags, repository::NoteRepository};

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let fd = File::create(path).with_context(|| format!("while creating {path:?}"))?;
    let mut writer = BufWriter::new(fd);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("while writing {path:?}"))?;
    writer.flush()?;
    Ok(())
}

/// Returns the number of notes written.
pub fn export(repository: &NoteRepository, out_dir: &Path) -> anyhow::Result<usize> {
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if out_dir exists, it must be directory.");
    }
    if let (Ok(notes), Ok(out)) = (
        repository.notes_dir().canonicalize(),
        out_dir.canonicalize(),
    ) {
        if notes.starts_with(&out) {
            bail!("out_dir {out_dir:?} contains the notes directory; refusing to remove it.");
        }
    }

    fs_extra::dir::remove(out_dir).with_context(|| format!("while removing {out_dir:?}"))?;
    let note_dir = out_dir.join("notes");
    fs_extra::dir::create_all(&note_dir, false)
        .with_context(|| format!("while creating {note_dir:?}"))?;

    let ids = repository.list_note_ids()?;
    write_json(&out_dir.join("ids.json"), &ids)?;

    let notes = repository.list_notes_sorted()?;
    write_json(&out_dir.join("notes.json"), &notes)?;
    write_json(&out_dir.join("tags.json"), &all_tags(&notes))?;

    let mut written = 0;
    for id in &ids {
        // removed between listing and reading
        let Some(note) = repository.get_note(&id.id)? else {
            debug!("{:?} vanished during export. skipping...", id.id);
            continue;
        };
        write_json(&note_dir.join(format!("{}.json", id.id)), &note)?;
        written += 1;
    }
    info!("Exported {written} notes to {out_dir:?}");

    Ok(written)
}
