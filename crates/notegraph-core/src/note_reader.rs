use crate::error::{NoteGraphError, ReadCause, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Raw notes keyed by their `/`-joined path relative to the export root,
/// e.g. `"Projects/Alpha.md"`.
pub type NoteCollection = BTreeMap<String, String>;

/// Files at or below this size hold nothing but an empty block.
pub const BLANK_NOTE_MAX_BYTES: u64 = 3;

/// Options for reading an export directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Leave out notes of `BLANK_NOTE_MAX_BYTES` or fewer, such as untouched
    /// daily pages.
    pub skip_blank_notes: bool,
}

/// Read every file under `root` into a flat collection.
///
/// Directory nesting is folded into the key: `root/a/b.md` becomes `"a/b.md"`.
/// Entries are visited in lexical order. The first unreadable directory or
/// file aborts the whole read; no partial collection is returned.
pub fn read_note_directory(root: &Path) -> Result<NoteCollection> {
    read_note_directory_with(root, ReadOptions::default())
}

/// Like [`read_note_directory`], with explicit options.
pub fn read_note_directory_with(root: &Path, options: ReadOptions) -> Result<NoteCollection> {
    let mut notes = NoteCollection::new();
    read_into(root, "", options, &mut notes)?;
    tracing::info!("Read {} notes from {}", notes.len(), root.display());
    Ok(notes)
}

fn read_into(
    dir: &Path,
    key_prefix: &str,
    options: ReadOptions,
    notes: &mut NoteCollection,
) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| NoteGraphError::read_failure(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| NoteGraphError::read_failure(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        // A lossy conversion could fold two names into one key.
        let name = entry
            .file_name()
            .into_string()
            .map_err(|raw| NoteGraphError::read_failure(&path, ReadCause::MalformedFileName(raw)))?;
        let file_type = entry
            .file_type()
            .map_err(|e| NoteGraphError::read_failure(&path, e))?;
        let key = format!("{}{}", key_prefix, name);

        if file_type.is_dir() {
            read_into(&path, &format!("{}/", key), options, notes)?;
        } else if file_type.is_file() {
            if options.skip_blank_notes {
                let len = entry
                    .metadata()
                    .map_err(|e| NoteGraphError::read_failure(&path, e))?
                    .len();
                if len <= BLANK_NOTE_MAX_BYTES {
                    tracing::debug!("Skipping blank note {} ({} bytes)", key, len);
                    continue;
                }
            }
            let bytes = fs::read(&path).map_err(|e| NoteGraphError::read_failure(&path, e))?;
            let content =
                String::from_utf8(bytes).map_err(|e| NoteGraphError::read_failure(&path, e))?;
            notes.insert(key, content);
        }
    }
    Ok(())
}
