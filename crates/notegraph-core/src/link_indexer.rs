use crate::link_parser::{extract_links, LinkOccurrence};
use crate::note_reader::NoteCollection;
use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Derive the note key a link target points at.
///
/// Example: `target_key("Projects/Alpha")` → `"Projects/Alpha.md"`
pub fn target_key(target_name: &str) -> String {
    format!("{}.md", target_name)
}

// ---------------------------------------------------------------------------
// BackLinkIndex
// ---------------------------------------------------------------------------

/// A single incoming reference: the note it came from and the occurrence
/// extracted from that note's original content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackLink {
    pub source_key: String,
    pub occurrence: LinkOccurrence,
}

/// Inverted forward links: target note key → every occurrence naming it.
///
/// Targets nobody links to have no entry at all. Bucket order follows
/// indexing order and carries no meaning; the renderer sorts before use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackLinkIndex {
    targets: BTreeMap<String, Vec<BackLink>>,
}

impl BackLinkIndex {
    /// Build the index from the original content of every note.
    ///
    /// Must run before any note is rendered or rewritten: occurrence offsets
    /// and matched text refer to the unmodified content.
    pub fn build(notes: &NoteCollection) -> Self {
        let mut index = BackLinkIndex::default();
        for (source_key, content) in notes {
            let occurrences = extract_links(content);
            tracing::debug!(
                "Note {}: {} outgoing links",
                source_key,
                occurrences.len()
            );
            for occurrence in occurrences {
                index.insert(source_key, occurrence);
            }
        }
        tracing::info!(
            "Indexed {} notes -> {} backlink targets",
            notes.len(),
            index.targets.len()
        );
        index
    }

    fn insert(&mut self, source_key: &str, occurrence: LinkOccurrence) {
        self.targets
            .entry(target_key(&occurrence.target_name))
            .or_default()
            .push(BackLink {
                source_key: source_key.to_string(),
                occurrence,
            });
    }

    /// Incoming links for a note key, or `None` when nothing links to it.
    pub fn get(&self, note_key: &str) -> Option<&[BackLink]> {
        self.targets.get(note_key).map(Vec::as_slice)
    }

    /// Number of distinct targets with at least one incoming link.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// All target keys, in lexical order.
    pub fn target_keys(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
