//! Markdown to HTML before a note is written.

use std::fmt;
use std::sync::Arc;

use pulldown_cmark::{html, Event, Options, Parser};

use super::BodyFormat;
use crate::error::Result;

/// Converts Markdown into the markup a note store accepts.
pub trait MarkdownToHtml: Send + Sync {
    /// Convert a Markdown string to HTML.
    fn to_html(&self, markdown: &str) -> Result<String>;
}

/// `pulldown-cmark` backed conversion.
///
/// Tables, strikethrough and fenced code are enabled. Single newlines are
/// rendered as `<br />` so line structure survives in the note.
#[derive(Debug, Clone, Copy)]
pub struct PulldownMarkdown {
    options: Options,
    hard_breaks: bool,
}

impl PulldownMarkdown {
    /// Create a converter with the default extensions.
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH,
            hard_breaks: true,
        }
    }

    /// Keep single newlines as soft breaks.
    pub fn with_soft_breaks(mut self) -> Self {
        self.hard_breaks = false;
        self
    }
}

impl Default for PulldownMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownToHtml for PulldownMarkdown {
    fn to_html(&self, markdown: &str) -> Result<String> {
        let hard_breaks = self.hard_breaks;
        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            other => other,
        });

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        Ok(output)
    }
}

/// Markdown capability injected into a note service.
#[derive(Clone, Default)]
pub enum MarkdownSupport {
    /// Markdown content is stored raw
    Disabled,
    /// Markdown content is converted with the given implementation
    Enabled(Arc<dyn MarkdownToHtml>),
    /// Converted with [`PulldownMarkdown`]
    #[default]
    Builtin,
}

impl MarkdownSupport {
    /// Wrap a custom converter.
    pub fn enabled(converter: impl MarkdownToHtml + 'static) -> Self {
        MarkdownSupport::Enabled(Arc::new(converter))
    }

    /// Prepare content for the store.
    ///
    /// Plain text and empty content pass through. Markdown is converted;
    /// when support is disabled or conversion fails the raw content is kept.
    pub fn prepare(&self, content: &str, format: BodyFormat) -> String {
        if format != BodyFormat::Markdown || content.is_empty() {
            return content.to_string();
        }

        let converted = match self {
            MarkdownSupport::Disabled => {
                log::warn!("Markdown support is disabled, storing raw content");
                return content.to_string();
            }
            MarkdownSupport::Enabled(converter) => converter.to_html(content),
            MarkdownSupport::Builtin => PulldownMarkdown::new().to_html(content),
        };

        match converted {
            Ok(html) => {
                log::debug!("Content converted from Markdown to HTML");
                html
            }
            Err(e) => {
                log::warn!("Markdown to HTML conversion failed: {}", e);
                content.to_string()
            }
        }
    }
}

impl fmt::Debug for MarkdownSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkdownSupport::Disabled => f.write_str("Disabled"),
            MarkdownSupport::Enabled(_) => f.write_str("Enabled(..)"),
            MarkdownSupport::Builtin => f.write_str("Builtin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Failing;

    impl MarkdownToHtml for Failing {
        fn to_html(&self, _markdown: &str) -> Result<String> {
            Err(Error::MarkdownConversion("Conversion Error".to_string()))
        }
    }

    #[test]
    fn test_pulldown_basic() {
        let html = PulldownMarkdown::new()
            .to_html("# Title\n\nSome **bold** text")
            .unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_pulldown_line_breaks() {
        let html = PulldownMarkdown::new().to_html("line one\nline two").unwrap();
        assert!(html.contains("line one<br />"));

        let soft = PulldownMarkdown::new()
            .with_soft_breaks()
            .to_html("line one\nline two")
            .unwrap();
        assert!(!soft.contains("<br />"));
    }

    #[test]
    fn test_pulldown_extensions() {
        let html = PulldownMarkdown::new()
            .to_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n```rust\nfn main() {}\n```")
            .unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<pre><code class=\"language-rust\">"));
    }

    #[test]
    fn test_prepare_plain_text_passthrough() {
        let support = MarkdownSupport::default();
        assert_eq!(support.prepare("# raw", BodyFormat::Text), "# raw");
        assert_eq!(support.prepare("", BodyFormat::Markdown), "");
    }

    #[test]
    fn test_prepare_disabled_keeps_raw() {
        let support = MarkdownSupport::Disabled;
        assert_eq!(
            support.prepare("# Raw Markdown", BodyFormat::Markdown),
            "# Raw Markdown"
        );
    }

    #[test]
    fn test_prepare_failure_keeps_raw() {
        let support = MarkdownSupport::enabled(Failing);
        assert_eq!(
            support.prepare("Problematic MD", BodyFormat::Markdown),
            "Problematic MD"
        );
    }

    #[test]
    fn test_prepare_converts() {
        let support = MarkdownSupport::Builtin;
        let html = support.prepare("# Hello", BodyFormat::Markdown);
        assert_eq!(html.trim(), "<h1>Hello</h1>");
    }
}
