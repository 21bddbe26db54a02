use crate::backlinks::append_backlinks;
use crate::link_indexer::BackLinkIndex;
use crate::link_rewriter::{format_checkboxes, link_prefix, rewrite_links};
use crate::note_reader::NoteCollection;
use std::collections::BTreeMap;

/// Final markdown keyed like the input collection.
pub type OutputCollection = BTreeMap<String, String>;

/// Transform one note given the prebuilt index.
///
/// Backlinks are appended first, so the generated section goes through the
/// same checkbox and link rewriting as the body.
pub fn transform_note(note_key: &str, content: &str, index: &BackLinkIndex) -> String {
    let with_backlinks = append_backlinks(content, index.get(note_key));
    let with_checkboxes = format_checkboxes(&with_backlinks);
    rewrite_links(&with_checkboxes, &link_prefix(note_key))
}

/// Turn a raw note collection into cross-linked markdown.
///
/// The backlink index is built from every note's original content before any
/// note is transformed. Notes whose output is empty are dropped.
pub fn transform_notes(notes: &NoteCollection) -> OutputCollection {
    let index = BackLinkIndex::build(notes);

    let mut output = OutputCollection::new();
    for (note_key, content) in notes {
        let transformed = transform_note(note_key, content, &index);
        if transformed.is_empty() {
            tracing::debug!("Dropping empty note {}", note_key);
            continue;
        }
        output.insert(note_key.clone(), transformed);
    }

    tracing::info!(
        "Transformed {} notes -> {} outputs ({} backlink targets)",
        notes.len(),
        output.len(),
        index.len()
    );
    output
}
