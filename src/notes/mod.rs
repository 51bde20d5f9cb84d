//! Note store collaborators.
//!
//! The reformatting core never talks to a notes application. This module
//! holds the thin layer around it: a [`NoteStore`] abstraction with an
//! `osascript`-backed implementation, the injected Markdown-to-HTML
//! capability used before a note is written, and a [`NoteService`] that
//! answers tool calls with a tagged [`ToolResponse`].
//!
//! # Example
//!
//! ```no_run
//! use notefmt::notes::{NoteService, OsaScriptStore};
//!
//! let service = NoteService::new(OsaScriptStore::new("./applescripts"));
//! let response = service.list_notes("");
//! println!("{}", response.to_json().unwrap());
//! ```

mod markdown;
mod osascript;
mod service;

pub use markdown::{MarkdownSupport, MarkdownToHtml, PulldownMarkdown};
pub use osascript::{OsaScriptStore, INFO_PREFIX, STORE_ERROR_PREFIX};
pub use service::{NoteService, ToolResponse, ToolStatus, TOOL_NAMES};

use crate::error::Result;

/// Storage backend holding notes by title and optional folder.
///
/// An empty folder means the store's default folder (or every folder, for
/// listing).
pub trait NoteStore {
    /// Create a note with a markup body. Returns the store's report.
    fn create_note(&self, title: &str, body: &str, folder: &str) -> Result<String>;

    /// Append markup to an existing note. Returns the store's report.
    fn append_to_note(&self, title: &str, folder: &str, body: &str) -> Result<String>;

    /// List note titles.
    fn list_notes(&self, folder: &str) -> Result<NoteListing>;

    /// Fetch the current markup body of a note.
    fn note_body(&self, title: &str, folder: &str) -> Result<String>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn create_note(&self, title: &str, body: &str, folder: &str) -> Result<String> {
        (**self).create_note(title, body, folder)
    }

    fn append_to_note(&self, title: &str, folder: &str, body: &str) -> Result<String> {
        (**self).append_to_note(title, folder, body)
    }

    fn list_notes(&self, folder: &str) -> Result<NoteListing> {
        (**self).list_notes(folder)
    }

    fn note_body(&self, title: &str, folder: &str) -> Result<String> {
        (**self).note_body(title, folder)
    }
}

/// Titles returned by a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListing {
    /// Note titles in store order
    pub titles: Vec<String>,

    /// Store report shown instead of the usual message, e.g. when the
    /// folder holds no notes
    pub notice: Option<String>,
}

impl NoteListing {
    /// Create a listing of titles.
    pub fn new(titles: Vec<String>) -> Self {
        Self {
            titles,
            notice: None,
        }
    }

    /// Create an empty listing carrying the store's report.
    pub fn empty_with_notice(notice: impl Into<String>) -> Self {
        Self {
            titles: Vec::new(),
            notice: Some(notice.into()),
        }
    }

    /// Check if there are no titles.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// How the content of a create/append call is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFormat {
    /// Stored as given
    #[default]
    Text,
    /// Converted to HTML first
    Markdown,
}

impl BodyFormat {
    /// Read a tool argument. Anything but `markdown` is plain text.
    pub fn from_arg(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("markdown") {
            BodyFormat::Markdown
        } else {
            BodyFormat::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_format_from_arg() {
        assert_eq!(BodyFormat::from_arg("markdown"), BodyFormat::Markdown);
        assert_eq!(BodyFormat::from_arg(" Markdown "), BodyFormat::Markdown);
        assert_eq!(BodyFormat::from_arg("text"), BodyFormat::Text);
        assert_eq!(BodyFormat::from_arg("html"), BodyFormat::Text);
        assert_eq!(BodyFormat::from_arg(""), BodyFormat::Text);
    }
}
