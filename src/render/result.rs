//! Rendering result with metadata and statistics.

use crate::model::{Metadata, Role};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Document metadata (copied from the aggregated document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while reformatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of scanned blocks or source lines
    pub block_count: u32,

    /// Number of sections emitted
    pub section_count: u32,

    /// Number of headings and subheadings
    pub heading_count: u32,

    /// Number of list items, ordered or not
    pub list_item_count: u32,

    /// Number of code lines
    pub code_line_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of table rows
    pub table_row_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one item with the given role.
    pub fn add_role(&mut self, role: Role) {
        match role {
            Role::Heading | Role::Subheading => self.heading_count += 1,
            Role::ListItem | Role::OrderedItem => self.list_item_count += 1,
            Role::Code => self.code_line_count += 1,
            Role::Paragraph => self.paragraph_count += 1,
            Role::TableRow => self.table_row_count += 1,
            Role::Title | Role::Rule | Role::Blank | Role::Skip => {}
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
