//! Backlink indexing and link rewriting for exported note graphs.
//!
//! The pipeline is read → index → transform:
//! [`note_reader::read_note_directory`] builds a [`NoteCollection`],
//! [`BackLinkIndex::build`] inverts every note's links, and
//! [`transform::transform_notes`] renders backlinks and rewrites links into
//! relative markdown hyperlinks.

pub mod backlinks;
pub mod error;
pub mod link_indexer;
pub mod link_parser;
pub mod link_rewriter;
pub mod note_reader;
pub mod transform;

pub use error::{NoteGraphError, ReadCause};
pub use link_indexer::{BackLink, BackLinkIndex};
pub use link_parser::{extract_links, LinkKind, LinkOccurrence};
pub use note_reader::{read_note_directory, read_note_directory_with, NoteCollection, ReadOptions};
pub use transform::{transform_notes, OutputCollection};
