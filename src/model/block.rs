//! Block and role types.

use serde::{Deserialize, Serialize};

/// One unit of scanned input content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Visible text, trimmed with whitespace collapsed
    pub text: String,

    /// Where the block came from
    pub source: SourceKind,

    /// Presentational hints gathered by the scanner
    pub hints: BlockHints,
}

impl Block {
    /// Create a block with default hints.
    pub fn new(text: impl Into<String>, source: SourceKind) -> Self {
        let text = text.into();
        let hints = BlockHints {
            leading_symbols: leading_symbols(&text),
            ..Default::default()
        };
        Self {
            text,
            source,
            hints,
        }
    }

    /// Create a block scanned from an HTML element.
    pub fn html(text: impl Into<String>, hints: BlockHints) -> Self {
        let text = text.into();
        let mut hints = hints;
        hints.leading_symbols = leading_symbols(&text);
        Self {
            text,
            source: SourceKind::HtmlElement,
            hints,
        }
    }

    /// Create a block from a Markdown source line.
    pub fn markdown_line(text: impl Into<String>) -> Self {
        Self::new(text, SourceKind::MarkdownLine)
    }

    /// Character count of the text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the text starts with a pictographic emoji.
    pub fn starts_with_emoji(&self) -> bool {
        self.hints
            .leading_symbols
            .first()
            .is_some_and(|c| crate::render::is_emoji_char(*c))
    }
}

/// Source kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// An element of an HTML fragment
    HtmlElement,
    /// A line of Markdown source
    MarkdownLine,
}

/// Presentational hints attached to a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHints {
    /// Largest font-size bucket found inside the block
    pub font_size: FontSize,

    /// Contains a bold marker outside any monospace marker
    pub bold: bool,

    /// Contains a monospace/code-font marker
    pub monospace: bool,

    /// The element itself is a list item
    pub list_item: bool,

    /// The element is nested inside a list item
    pub in_list: bool,

    /// Emoji and marker symbols the text starts with
    pub leading_symbols: Vec<char>,
}

/// Font-size bucket derived from inline style hints.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    /// Body text or no size hint
    #[default]
    Normal,
    /// Section heading size
    Medium,
    /// Document title size
    Large,
}

/// Structural role assigned to a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Document title
    Title,
    /// Section heading
    Heading,
    /// Lesser heading inside a section
    Subheading,
    /// Code line or block
    Code,
    /// Unordered list item
    ListItem,
    /// Ordered list item
    OrderedItem,
    /// Table row
    TableRow,
    /// Horizontal rule
    Rule,
    /// Body paragraph
    Paragraph,
    /// Blank line
    Blank,
    /// Layout noise, dropped
    Skip,
}

impl Role {
    /// Check if blocks with this role carry section content.
    pub fn is_content(&self) -> bool {
        !matches!(self, Role::Title | Role::Heading | Role::Blank | Role::Skip)
    }

    /// Short lowercase name used in logs and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Title => "title",
            Role::Heading => "heading",
            Role::Subheading => "subheading",
            Role::Code => "code",
            Role::ListItem => "list-item",
            Role::OrderedItem => "ordered-item",
            Role::TableRow => "table-row",
            Role::Rule => "rule",
            Role::Paragraph => "paragraph",
            Role::Blank => "blank",
            Role::Skip => "skip",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collect the emoji and marker symbols a text starts with.
fn leading_symbols(text: &str) -> Vec<char> {
    text.chars()
        .take_while(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .filter(|c| crate::render::is_symbol_char(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_symbols() {
        let block = Block::markdown_line("🎯 目标");
        assert_eq!(block.hints.leading_symbols, vec!['🎯']);
        assert!(block.starts_with_emoji());

        let bullet = Block::markdown_line("• buy milk");
        assert_eq!(bullet.hints.leading_symbols, vec!['•']);
        assert!(!bullet.starts_with_emoji());

        let plain = Block::markdown_line("Plain text");
        assert!(!plain.starts_with_emoji());
    }

    #[test]
    fn test_font_size_ordering() {
        assert!(FontSize::Large > FontSize::Medium);
        assert!(FontSize::Medium > FontSize::Normal);
        assert_eq!(FontSize::default(), FontSize::Normal);
    }

    #[test]
    fn test_role_content() {
        assert!(Role::Paragraph.is_content());
        assert!(Role::Code.is_content());
        assert!(!Role::Heading.is_content());
        assert!(!Role::Skip.is_content());
        assert_eq!(Role::ListItem.to_string(), "list-item");
    }

    #[test]
    fn test_char_len_counts_chars() {
        let block = Block::markdown_line("中文");
        assert_eq!(block.char_len(), 2);
    }
}
