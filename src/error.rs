//! Error types for notefmt.

use std::io;
use thiserror::Error;

/// Result type alias for notefmt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reformatting or talking to a note store.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or spawning a script.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input was empty or whitespace only.
    #[error("Input is empty")]
    EmptyInput,

    /// The markup could not be structured into blocks.
    #[error("Markup parsing error: {0}")]
    MarkupParse(String),

    /// Input exceeds the configured size limit.
    #[error("Input of {0} bytes exceeds the limit of {1} bytes")]
    InputTooLarge(usize, usize),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Markdown to HTML conversion failed.
    #[error("Markdown conversion error: {0}")]
    MarkdownConversion(String),

    /// No pipeline is registered under the requested name.
    #[error("Unknown pipeline: {0}")]
    UnknownPipeline(String),

    /// A note store script is missing from the script directory.
    #[error("Script {0} not found.")]
    ScriptNotFound(String),

    /// A note store script ran but reported a failure.
    #[error("Error executing '{script}': {message}")]
    ExecutionFailed {
        /// Script file name
        script: String,
        /// Captured error output
        message: String,
    },

    /// No note matched the requested title.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// More than one note matched the requested title.
    #[error("Multiple notes matched: {0}")]
    MultipleNotesMatched(String),

    /// The requested folder does not exist.
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// A required argument was missing or invalid.
    #[error("{0}")]
    InvalidArgument(String),
}

impl Error {
    /// Check if this error is tolerated by falling back to raw passthrough.
    pub fn is_parse_tolerated(&self) -> bool {
        matches!(self, Error::MarkupParse(_) | Error::InputTooLarge(..))
    }

    /// Check if this error was reported by the note store.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Error::ScriptNotFound(_)
                | Error::ExecutionFailed { .. }
                | Error::NoteNotFound(_)
                | Error::MultipleNotesMatched(_)
                | Error::FolderNotFound(_)
        )
    }
}
