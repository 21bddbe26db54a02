use std::ffi::OsString;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors raised while loading a note collection from disk.
///
/// Everything past loading is infallible, so this is the only error type the
/// core exposes.
#[derive(Debug, Error)]
pub enum NoteGraphError {
    #[error("failed to read {}: {cause}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        cause: ReadCause,
    },
}

/// Why a single path could not be read.
#[derive(Debug, Error)]
pub enum ReadCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] FromUtf8Error),
    #[error("malformed encoding in file name {0:?}")]
    MalformedFileName(OsString),
}

impl NoteGraphError {
    pub(crate) fn read_failure(path: impl Into<PathBuf>, cause: impl Into<ReadCause>) -> Self {
        NoteGraphError::ReadFailure {
            path: path.into(),
            cause: cause.into(),
        }
    }

    /// The path that could not be read.
    pub fn path(&self) -> &std::path::Path {
        match self {
            NoteGraphError::ReadFailure { path, .. } => path,
        }
    }

    /// True when the content or the file name is not valid UTF-8.
    pub fn is_malformed_encoding(&self) -> bool {
        matches!(
            self,
            NoteGraphError::ReadFailure {
                cause: ReadCause::MalformedEncoding(_) | ReadCause::MalformedFileName(_),
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, NoteGraphError>;
