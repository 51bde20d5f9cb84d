//! Document-level types.

use super::Role;
use serde::{Deserialize, Serialize};

/// An aggregated document: title metadata plus ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Sections in order of first appearance
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Get the total number of content entries across sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Check if the document has neither a title nor sections.
    pub fn is_empty(&self) -> bool {
        self.metadata.title.is_none() && self.sections.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref title) = self.metadata.title {
            parts.push(title.clone());
        }
        for section in &self.sections {
            parts.push(section.plain_text());
        }
        parts.join("\n\n")
    }
}

/// Document metadata gathered during aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title taken from the first title block
    pub title: Option<String>,

    /// Number of blocks seen by the aggregator
    pub block_count: u32,

    /// Number of blocks classified as skip
    pub skipped_count: u32,

    /// Number of preamble entries dropped before the first heading
    pub discarded_count: u32,
}

/// An ordered, optionally titled grouping of classified content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cleaned title, absent for an implicit leading section
    pub title: Option<String>,

    /// Content entries in input order
    pub entries: Vec<SectionEntry>,
}

impl Section {
    /// Create a titled section.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            entries: Vec::new(),
        }
    }

    /// Create an untitled section.
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: SectionEntry) {
        self.entries.push(entry);
    }

    /// Check if the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get plain text content of the section.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        if let Some(ref title) = self.title {
            lines.push(title.as_str());
        }
        lines.extend(self.entries.iter().map(|e| e.text.as_str()));
        lines.join("\n")
    }
}

/// One content entry inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Role assigned by the classifier
    pub role: Role,

    /// Entry text
    pub text: String,

    /// Bold paragraph that did not qualify as a subheading
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub emphasis: bool,
}

impl SectionEntry {
    /// Create a new entry.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            emphasis: false,
        }
    }

    /// Create an emphasised paragraph entry.
    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            role: Role::Paragraph,
            text: text.into(),
            emphasis: true,
        }
    }
}
