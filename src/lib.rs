//! # notefmt
//!
//! Heuristic reformatters for notes-app content.
//!
//! The library takes loosely structured text (HTML exported from a notes
//! app, raw Markdown, or a copied assistant dialogue) and rewrites it into
//! a differently structured plain-text layout. Structure is inferred from
//! weak signals such as font size, boldness, monospace fonts and leading
//! symbols rather than from semantic tags.
//!
//! ## Quick Start
//!
//! ```
//! use notefmt::{classify_and_render_html, transform_markdown_for_plaintext_surface};
//! use notefmt::HtmlStyle;
//!
//! let html = r#"<div><span style="font-size: 24px">Doc Title</span></div>
//!               <div>Some content here that is long enough.</div>"#;
//! let report = classify_and_render_html(html, HtmlStyle::Detailed);
//! assert!(report.contains("【 Doc Title 】"));
//!
//! let text = transform_markdown_for_plaintext_surface("# Title\nHello world.");
//! assert!(text.contains("【Title】"));
//! ```
//!
//! ## Pipelines
//!
//! - **HTML**: scan → classify → aggregate → detailed report or compact Markdown
//! - **Markdown**: line classification → plain text with spacing
//! - **Dialogue**: turn detection and key-info extraction → knowledge article
//!
//! The three boundary functions never fail and never return an empty
//! string. The `*_with_options` and `render_*` variants expose the
//! underlying `Result`s.

pub mod aggregate;
pub mod classify;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod notes;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use aggregate::{PreamblePolicy, SectionAggregator};
pub use classify::{classify_blocks, ClassifiedBlock, RoleClassifier};
pub use convert::{ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter};
pub use detect::{detect_format, InputFormat};
pub use error::{Error, Result};
pub use model::{
    Block, BlockHints, DialogueTurn, Document, FontSize, KeyInfo, Metadata, Role, Section,
    SectionEntry, SourceKind, TurnRole,
};
pub use parser::ParseOptions;
pub use render::{
    CleanupOptions, CleanupPreset, DialogueMode, ExtractionStats, HtmlStyle, JsonFormat,
    RenderOptions, RenderResult, TimestampMode,
};

/// Output for Markdown input with no renderable lines.
pub const EMPTY_PLAINTEXT_DOCUMENT: &str = "（无内容）";

/// Scan, classify and aggregate an HTML fragment.
///
/// The style decides the preamble policy and emoji heading detection,
/// unless `render` overrides them.
pub fn parse_html(
    html: &str,
    style: HtmlStyle,
    parse: &ParseOptions,
    render: &RenderOptions,
) -> Result<Document> {
    if html.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let blocks = parser::scan_html(html, parse)?;
    let classified = classify_blocks(blocks, parse);

    let mut aggregator = SectionAggregator::new(render.preamble_for(style));
    if let Some(max_chars) = render.emoji_headings_for(style) {
        aggregator = aggregator.with_emoji_headings(max_chars);
    }
    for block in &classified {
        aggregator.push(block);
    }
    Ok(aggregator.finish())
}

/// Scan and classify an HTML fragment without aggregating it.
pub fn inspect_html(html: &str, parse: &ParseOptions) -> Result<Vec<ClassifiedBlock>> {
    let blocks = parser::scan_html(html, parse)?;
    Ok(classify_blocks(blocks, parse))
}

/// Render an HTML fragment in the given style.
pub fn render_html(
    html: &str,
    style: HtmlStyle,
    parse: &ParseOptions,
    render: &RenderOptions,
) -> Result<String> {
    let doc = parse_html(html, style, parse, render)?;
    render_document(&doc, style, render)
}

/// Render an HTML fragment in the given style with statistics.
pub fn render_html_with_stats(
    html: &str,
    style: HtmlStyle,
    parse: &ParseOptions,
    render: &RenderOptions,
) -> Result<RenderResult> {
    let doc = parse_html(html, style, parse, render)?;
    match style {
        HtmlStyle::Detailed => render::to_report_with_stats(&doc, render),
        HtmlStyle::Simple => render::to_simple_markdown_with_stats(&doc, render),
    }
}

/// Render an aggregated document in the given style.
pub fn render_document(doc: &Document, style: HtmlStyle, render: &RenderOptions) -> Result<String> {
    match style {
        HtmlStyle::Detailed => render::to_report(doc, render),
        HtmlStyle::Simple => render::to_simple_markdown(doc, render),
    }
}

/// Reformat notes-app HTML into a detailed report or compact Markdown.
///
/// Never fails: empty input renders an empty document and unparseable
/// markup is returned as-is under a diagnostic header.
pub fn classify_and_render_html(html: &str, style: HtmlStyle) -> String {
    classify_and_render_html_with_options(
        html,
        style,
        &ParseOptions::default(),
        &RenderOptions::default(),
    )
}

/// Reformat notes-app HTML with custom options. Never fails.
pub fn classify_and_render_html_with_options(
    html: &str,
    style: HtmlStyle,
    parse: &ParseOptions,
    render: &RenderOptions,
) -> String {
    match render_html(html, style, parse, render) {
        Ok(output) => output,
        Err(Error::EmptyInput) => render_document(&Document::new(), style, render)
            .unwrap_or_else(|_| render::DEFAULT_REPORT_TITLE.to_string()),
        Err(err) if err.is_parse_tolerated() => {
            log::warn!("Falling back to raw passthrough: {}", err);
            diagnostic_document(&err, html)
        }
        Err(err) => {
            log::error!("Rendering failed: {}", err);
            diagnostic_document(&err, html)
        }
    }
}

/// Prefix raw input with a diagnostic header.
pub fn diagnostic_document(err: &Error, raw: &str) -> String {
    format!("⚠️ 无法解析笔记格式：{}\n\n{}", err, raw)
}

/// Transform Markdown into spaced plain text for surfaces without
/// Markdown rendering. Never fails.
pub fn transform_markdown_for_plaintext_surface(markdown: &str) -> String {
    transform_markdown_for_plaintext_surface_with_options(markdown, &RenderOptions::default())
}

/// Transform Markdown into spaced plain text with custom options.
pub fn transform_markdown_for_plaintext_surface_with_options(
    markdown: &str,
    render: &RenderOptions,
) -> String {
    if markdown.trim().is_empty() {
        return EMPTY_PLAINTEXT_DOCUMENT.to_string();
    }
    match render::to_plaintext_surface(markdown, render) {
        Ok(output) if !output.trim().is_empty() => output,
        Ok(_) => EMPTY_PLAINTEXT_DOCUMENT.to_string(),
        Err(err) => {
            log::warn!("Falling back to raw passthrough: {}", err);
            diagnostic_document(&err, markdown)
        }
    }
}

/// Render a dialogue transcript with the given template.
pub fn render_dialogue(text: &str, mode: DialogueMode, render: &RenderOptions) -> Result<String> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let info = parser::extract_key_info(text);
    let output = match mode {
        DialogueMode::Dialogue => {
            let turns = parser::detect_dialogue(text);
            let cleaned = parser::dialogue::clean_dialogue_text(text);
            render::to_dialogue_article(&turns, &info, &cleaned)?
        }
        DialogueMode::Simple => render::to_request_template(text, &info)?,
    };
    Ok(render.finish(output))
}

/// Convert a copied assistant dialogue into a knowledge article. Never fails.
pub fn convert_dialogue(text: &str, mode: DialogueMode) -> String {
    convert_dialogue_with_options(text, mode, &RenderOptions::default())
}

/// Convert a dialogue with custom options. Never fails.
pub fn convert_dialogue_with_options(
    text: &str,
    mode: DialogueMode,
    render: &RenderOptions,
) -> String {
    match render_dialogue(text, mode, render) {
        Ok(output) => output,
        Err(Error::EmptyInput) => render::EMPTY_DIALOGUE_DOCUMENT.to_string(),
        Err(err) => {
            log::warn!("Falling back to raw passthrough: {}", err);
            diagnostic_document(&err, text)
        }
    }
}

/// Builder over the three pipelines with shared options.
///
/// # Example
///
/// ```
/// use notefmt::{Notefmt, HtmlStyle, TimestampMode};
///
/// let output = Notefmt::new()
///     .with_timestamp(TimestampMode::Omit)
///     .with_min_paragraph_chars(10)
///     .html("<p>A short paragraph</p>", HtmlStyle::Detailed);
/// assert!(output.contains("A short paragraph"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Notefmt {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Notefmt {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the report timestamp mode.
    pub fn with_timestamp(mut self, mode: TimestampMode) -> Self {
        self.render_options = self.render_options.with_timestamp(mode);
        self
    }

    /// Set the cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Set the minimum paragraph length.
    pub fn with_min_paragraph_chars(mut self, chars: usize) -> Self {
        self.parse_options = self.parse_options.with_min_paragraph_chars(chars);
        self
    }

    /// Override the preamble policy.
    pub fn with_preamble_policy(mut self, policy: PreamblePolicy) -> Self {
        self.render_options = self.render_options.with_preamble_policy(policy);
        self
    }

    /// Reformat HTML. Never fails.
    pub fn html(&self, html: &str, style: HtmlStyle) -> String {
        classify_and_render_html_with_options(
            html,
            style,
            &self.parse_options,
            &self.render_options,
        )
    }

    /// Parse HTML into an aggregated document.
    pub fn parse_html(&self, html: &str, style: HtmlStyle) -> Result<Document> {
        parse_html(html, style, &self.parse_options, &self.render_options)
    }

    /// Reformat Markdown. Never fails.
    pub fn markdown(&self, markdown: &str) -> String {
        transform_markdown_for_plaintext_surface_with_options(markdown, &self.render_options)
    }

    /// Convert a dialogue. Never fails.
    pub fn dialogue(&self, text: &str, mode: DialogueMode) -> String {
        convert_dialogue_with_options(text, mode, &self.render_options)
    }
}
