//! Line classifier for raw Markdown.
//!
//! Markdown is not parsed into a tree here. Each source line is classified on
//! its own, with one piece of carried state: whether a code fence is open.
//! Table state belongs to the renderer, which needs it for spacing.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Role;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}(#+)\s+(.+?)\s*$").expect("valid regex"));
static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}(?:-{3,}|\*{3,}|_{3,})\s*$").expect("valid regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)[-*+]\s+(.+?)\s*$").expect("valid regex"));
static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\.\s+(.+?)\s*$").expect("valid regex"));

/// Indent width at which a bullet counts as nested.
const NESTED_INDENT: usize = 2;

/// One classified Markdown source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownLine<'a> {
    /// Empty or whitespace-only line outside a fence
    Blank,
    /// Opening code fence, with the info string when present
    FenceOpen { language: Option<&'a str> },
    /// Closing code fence
    FenceClose,
    /// Line inside an open fence, untouched
    Code(&'a str),
    /// ATX heading; level is the length of the `#` run
    Heading { level: usize, text: &'a str },
    /// Horizontal rule
    Rule,
    /// Table row split into trimmed cells
    TableRow(Vec<&'a str>),
    /// Table alignment row
    TableDelimiter,
    /// Unordered list item
    Bullet { nested: bool, text: &'a str },
    /// Ordered list item
    Ordered { number: &'a str, text: &'a str },
    /// Anything else
    Paragraph(&'a str),
}

impl MarkdownLine<'_> {
    /// Role of the line in the shared role set.
    pub fn role(&self) -> Role {
        match self {
            MarkdownLine::Blank => Role::Blank,
            MarkdownLine::FenceOpen { .. } | MarkdownLine::FenceClose | MarkdownLine::Code(_) => {
                Role::Code
            }
            MarkdownLine::Heading { level, .. } if *level <= 2 => Role::Heading,
            MarkdownLine::Heading { .. } => Role::Subheading,
            MarkdownLine::Rule => Role::Rule,
            MarkdownLine::TableRow(_) => Role::TableRow,
            MarkdownLine::TableDelimiter => Role::Skip,
            MarkdownLine::Bullet { .. } => Role::ListItem,
            MarkdownLine::Ordered { .. } => Role::OrderedItem,
            MarkdownLine::Paragraph(_) => Role::Paragraph,
        }
    }

    /// Check if the line belongs to a table.
    pub fn is_table(&self) -> bool {
        matches!(self, MarkdownLine::TableRow(_) | MarkdownLine::TableDelimiter)
    }

    /// Text carried by the line, if any.
    pub fn text(&self) -> Option<String> {
        match self {
            MarkdownLine::Blank | MarkdownLine::FenceClose | MarkdownLine::Rule => None,
            MarkdownLine::TableDelimiter => None,
            MarkdownLine::FenceOpen { language } => language.map(str::to_string),
            MarkdownLine::Code(text)
            | MarkdownLine::Heading { text, .. }
            | MarkdownLine::Bullet { text, .. }
            | MarkdownLine::Ordered { text, .. }
            | MarkdownLine::Paragraph(text) => Some(text.to_string()),
            MarkdownLine::TableRow(cells) => Some(cells.join(" | ")),
        }
    }
}

/// Stateful line classifier.
#[derive(Debug, Default)]
pub struct MarkdownScanner {
    /// Marker character of the open fence
    fence: Option<char>,
}

impl MarkdownScanner {
    /// Create a scanner with no open fence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a code fence is currently open.
    pub fn in_code_fence(&self) -> bool {
        self.fence.is_some()
    }

    /// Classify the next source line.
    pub fn classify<'a>(&mut self, line: &'a str) -> MarkdownLine<'a> {
        let trimmed = line.trim();

        if let Some(marker) = fence_marker(trimmed) {
            match self.fence {
                None => {
                    self.fence = Some(marker);
                    let info = trimmed.trim_start_matches(marker).trim();
                    let language = info.split_whitespace().next();
                    return MarkdownLine::FenceOpen { language };
                }
                Some(open) if open == marker => {
                    self.fence = None;
                    return MarkdownLine::FenceClose;
                }
                Some(_) => {}
            }
        }
        if self.fence.is_some() {
            return MarkdownLine::Code(line.trim_end());
        }

        if trimmed.is_empty() {
            return MarkdownLine::Blank;
        }
        if let Some(caps) = HEADING.captures(line) {
            if let (Some(run), Some(text)) = (caps.get(1), caps.get(2)) {
                return MarkdownLine::Heading {
                    level: run.as_str().len(),
                    text: text.as_str(),
                };
            }
        }
        if RULE.is_match(line) {
            return MarkdownLine::Rule;
        }
        if trimmed.contains('|') {
            return table_line(trimmed);
        }
        if let Some(caps) = BULLET.captures(line) {
            if let (Some(indent), Some(text)) = (caps.get(1), caps.get(2)) {
                return MarkdownLine::Bullet {
                    nested: indent_width(indent.as_str()) >= NESTED_INDENT,
                    text: text.as_str(),
                };
            }
        }
        if let Some(caps) = ORDERED.captures(line) {
            if let (Some(number), Some(text)) = (caps.get(1), caps.get(2)) {
                return MarkdownLine::Ordered {
                    number: number.as_str(),
                    text: text.as_str(),
                };
            }
        }
        MarkdownLine::Paragraph(trimmed)
    }
}

/// Classify every line of a Markdown document.
pub fn scan_markdown(markdown: &str) -> Vec<MarkdownLine<'_>> {
    let mut scanner = MarkdownScanner::new();
    let lines: Vec<_> = markdown.lines().map(|l| scanner.classify(l)).collect();
    if scanner.in_code_fence() {
        log::debug!("Unterminated code fence runs to end of input");
    }
    lines
}

fn fence_marker(trimmed: &str) -> Option<char> {
    if trimmed.starts_with("```") {
        Some('`')
    } else if trimmed.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}

fn table_line(trimmed: &str) -> MarkdownLine<'_> {
    let is_delimiter = trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'));
    if is_delimiter {
        return MarkdownLine::TableDelimiter;
    }

    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    MarkdownLine::TableRow(inner.split('|').map(str::trim).collect())
}

fn indent_width(indent: &str) -> usize {
    indent.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_by_run_length() {
        let lines = scan_markdown("# One\n### Three\n###### Six\n#hashtag");
        assert_eq!(lines[0], MarkdownLine::Heading { level: 1, text: "One" });
        assert_eq!(lines[1], MarkdownLine::Heading { level: 3, text: "Three" });
        assert_eq!(lines[2], MarkdownLine::Heading { level: 6, text: "Six" });
        assert_eq!(lines[3], MarkdownLine::Paragraph("#hashtag"));
    }

    #[test]
    fn test_fence_suppresses_other_rules() {
        let lines = scan_markdown("```rust\n# not a heading\n| a | b |\n```\n# heading");
        assert_eq!(lines[0], MarkdownLine::FenceOpen { language: Some("rust") });
        assert_eq!(lines[1], MarkdownLine::Code("# not a heading"));
        assert_eq!(lines[2], MarkdownLine::Code("| a | b |"));
        assert_eq!(lines[3], MarkdownLine::FenceClose);
        assert!(matches!(lines[4], MarkdownLine::Heading { level: 1, .. }));
    }

    #[test]
    fn test_fence_markers_must_match() {
        let lines = scan_markdown("~~~\n```\nstill code\n~~~");
        assert_eq!(lines[0], MarkdownLine::FenceOpen { language: None });
        assert_eq!(lines[1], MarkdownLine::Code("```"));
        assert_eq!(lines[3], MarkdownLine::FenceClose);
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let lines = scan_markdown("```\n- item\nplain");
        assert!(lines[1..].iter().all(|l| matches!(l, MarkdownLine::Code(_))));
    }

    #[test]
    fn test_rules() {
        for rule in ["---", "***", "___", "-----", "  ---  "] {
            assert_eq!(scan_markdown(rule)[0], MarkdownLine::Rule, "{rule:?}");
        }
        assert_ne!(scan_markdown("--")[0], MarkdownLine::Rule);
        assert_ne!(scan_markdown("-*-")[0], MarkdownLine::Rule);
    }

    #[test]
    fn test_table_rows_and_delimiters() {
        let lines = scan_markdown("| Name | Value | Note |\n|:---|---:|---|\n| a | b | c |");
        assert_eq!(lines[0], MarkdownLine::TableRow(vec!["Name", "Value", "Note"]));
        assert_eq!(lines[1], MarkdownLine::TableDelimiter);
        assert_eq!(lines[2], MarkdownLine::TableRow(vec!["a", "b", "c"]));
        assert!(lines.iter().all(MarkdownLine::is_table));
    }

    #[test]
    fn test_heading_with_pipe_is_heading() {
        let lines = scan_markdown("## A | B");
        assert!(matches!(lines[0], MarkdownLine::Heading { level: 2, .. }));
    }

    #[test]
    fn test_list_items() {
        let lines = scan_markdown("- top\n  - nested\n* star\n+ plus\n12. twelfth");
        assert_eq!(lines[0], MarkdownLine::Bullet { nested: false, text: "top" });
        assert_eq!(lines[1], MarkdownLine::Bullet { nested: true, text: "nested" });
        assert_eq!(lines[2], MarkdownLine::Bullet { nested: false, text: "star" });
        assert_eq!(lines[3], MarkdownLine::Bullet { nested: false, text: "plus" });
        assert_eq!(
            lines[4],
            MarkdownLine::Ordered {
                number: "12",
                text: "twelfth"
            }
        );
    }

    #[test]
    fn test_roles() {
        let lines = scan_markdown("# H\n### h\n\n- a\n1. b\n---\ntext");
        let roles: Vec<Role> = lines.iter().map(MarkdownLine::role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Heading,
                Role::Subheading,
                Role::Blank,
                Role::ListItem,
                Role::OrderedItem,
                Role::Rule,
                Role::Paragraph,
            ]
        );
    }
}
