//! Input scanners.
//!
//! Each scanner turns one input grammar into a typed stream: HTML fragments
//! into [`Block`](crate::model::Block)s, Markdown into classified lines and
//! dialogue transcripts into turns.

pub mod dialogue;
mod html;
pub mod markdown;
mod options;

pub use dialogue::{detect_dialogue, extract_key_info, DialogueScanner};
pub use html::scan_html;
pub use markdown::{scan_markdown, MarkdownLine, MarkdownScanner};
pub use options::ParseOptions;
