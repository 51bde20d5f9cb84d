//! Built-in pipeline converters.

use crate::error::Result;
use crate::model::Metadata;
use crate::render::{self, DialogueMode, ExtractionStats, HtmlStyle};

use super::{ConvertOptions, ConvertResult, DocumentConverter};

/// Notes-app HTML to a detailed report or compact Markdown.
#[derive(Debug, Clone, Copy)]
pub struct HtmlConverter {
    style: HtmlStyle,
}

impl HtmlConverter {
    /// Converter for the detailed report.
    pub fn detailed() -> Self {
        Self {
            style: HtmlStyle::Detailed,
        }
    }

    /// Converter for compact Markdown.
    pub fn simple() -> Self {
        Self {
            style: HtmlStyle::Simple,
        }
    }

    fn mime_type(&self) -> &'static str {
        match self.style {
            HtmlStyle::Detailed => "text/plain",
            HtmlStyle::Simple => "text/markdown",
        }
    }
}

impl DocumentConverter for HtmlConverter {
    fn name(&self) -> &str {
        match self.style {
            HtmlStyle::Detailed => "html-detailed",
            HtmlStyle::Simple => "html-simple",
        }
    }

    fn aliases(&self) -> &[&str] {
        match self.style {
            HtmlStyle::Detailed => &["html", "report"],
            HtmlStyle::Simple => &["compact"],
        }
    }

    fn description(&self) -> &str {
        match self.style {
            HtmlStyle::Detailed => "Notes HTML to a box-framed knowledge-base report",
            HtmlStyle::Simple => "Notes HTML to compact heading/list Markdown",
        }
    }

    fn convert(&self, input: &str, options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = crate::parse_html(input, self.style, &options.parse, &options.render)?;
        let metadata = doc.metadata.clone();

        if options.collect_stats {
            let result = match self.style {
                HtmlStyle::Detailed => render::to_report_with_stats(&doc, &options.render)?,
                HtmlStyle::Simple => render::to_simple_markdown_with_stats(&doc, &options.render)?,
            };
            Ok(ConvertResult::new(result.content, metadata)
                .with_stats(result.stats)
                .with_mime_type(self.mime_type()))
        } else {
            let content = crate::render_document(&doc, self.style, &options.render)?;
            Ok(ConvertResult::new(content, metadata).with_mime_type(self.mime_type()))
        }
    }
}

/// Markdown to spaced plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter {
    _private: (),
}

impl MarkdownConverter {
    /// Create a new Markdown converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for MarkdownConverter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn aliases(&self) -> &[&str] {
        &["md", "plaintext"]
    }

    fn description(&self) -> &str {
        "Markdown to plain text for surfaces without Markdown rendering"
    }

    fn convert(&self, input: &str, options: &ConvertOptions) -> Result<ConvertResult> {
        if options.collect_stats {
            let result = render::to_plaintext_surface_with_stats(input, &options.render)?;
            Ok(ConvertResult::new(result.content, Metadata::default()).with_stats(result.stats))
        } else {
            let content = render::to_plaintext_surface(input, &options.render)?;
            Ok(ConvertResult::new(content, Metadata::default()))
        }
    }
}

/// Assistant dialogue to a knowledge article.
#[derive(Debug, Clone, Copy)]
pub struct DialogueConverter {
    mode: DialogueMode,
}

impl DialogueConverter {
    /// Converter for the turn-based article.
    pub fn dialogue() -> Self {
        Self {
            mode: DialogueMode::Dialogue,
        }
    }

    /// Converter for the fixed request template.
    pub fn simple() -> Self {
        Self {
            mode: DialogueMode::Simple,
        }
    }
}

impl DocumentConverter for DialogueConverter {
    fn name(&self) -> &str {
        match self.mode {
            DialogueMode::Dialogue => "dialogue",
            DialogueMode::Simple => "dialogue-simple",
        }
    }

    fn aliases(&self) -> &[&str] {
        match self.mode {
            DialogueMode::Dialogue => &["chat"],
            DialogueMode::Simple => &["request"],
        }
    }

    fn description(&self) -> &str {
        match self.mode {
            DialogueMode::Dialogue => "Assistant dialogue to a knowledge-base article",
            DialogueMode::Simple => "Single request to an outline template",
        }
    }

    fn convert(&self, input: &str, options: &ConvertOptions) -> Result<ConvertResult> {
        let content = crate::render_dialogue(input, self.mode, &options.render)?;
        let metadata = Metadata {
            title: crate::parser::extract_key_info(input).title,
            ..Default::default()
        };

        let mut result = ConvertResult::new(content, metadata).with_mime_type("text/markdown");
        if options.collect_stats {
            let mut stats = ExtractionStats::new();
            stats.block_count = crate::parser::detect_dialogue(input).len() as u32;
            stats.count_text(&result.content);
            result = result.with_stats(stats);
        }
        Ok(result)
    }
}
