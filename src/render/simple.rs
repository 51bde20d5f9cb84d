//! Compact heading/list Markdown.

use crate::error::Result;
use crate::model::{Document, Role, Section};

use super::{clean_heading_text, ExtractionStats, RenderOptions, RenderResult};

/// Title used when the document has none.
pub const DEFAULT_SIMPLE_TITLE: &str = "笔记整理";

/// Render a document as compact Markdown.
pub fn to_simple_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    SimpleRenderer::new(options.clone()).render(doc)
}

/// Render a document as compact Markdown with statistics.
pub fn to_simple_markdown_with_stats(
    doc: &Document,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    SimpleRenderer::new(options).render_with_stats(doc)
}

/// Compact Markdown renderer.
pub struct SimpleRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl SimpleRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        Ok(self.render_internal(doc))
    }

    /// Render a document with extraction statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc);
        self.stats.block_count = doc.metadata.block_count;
        self.stats.count_text(&content);
        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> String {
        let title = doc
            .metadata
            .title
            .as_deref()
            .unwrap_or(DEFAULT_SIMPLE_TITLE);
        let mut output = format!("# {}\n\n", title);

        let mut number = 0;
        for section in &doc.sections {
            if section.title.is_some() {
                number += 1;
            }
            self.render_section(&mut output, section, number);
        }

        self.options.finish(output)
    }

    fn render_section(&mut self, output: &mut String, section: &Section, number: usize) {
        if self.options.collect_stats {
            self.stats.section_count += 1;
        }
        if let Some(ref title) = section.title {
            if self.options.collect_stats {
                self.stats.add_role(Role::Heading);
            }
            output.push_str(&format!("## {}. {}\n\n", number, title));
        }

        let mut in_list = false;
        for entry in &section.entries {
            if self.options.collect_stats {
                self.stats.add_role(entry.role);
            }
            let is_list = matches!(entry.role, Role::ListItem | Role::OrderedItem);
            if in_list && !is_list {
                output.push('\n');
            }
            in_list = is_list;

            match entry.role {
                Role::ListItem | Role::OrderedItem => {
                    output.push_str(&format!("- {}\n", entry.text));
                }
                Role::Subheading => {
                    output.push_str(&format!("**{}**\n\n", clean_heading_text(&entry.text)));
                }
                Role::Paragraph if entry.emphasis => {
                    output.push_str(&format!("**{}**\n\n", entry.text));
                }
                Role::Code => {
                    output.push_str(&format!("`{}`\n\n", entry.text));
                }
                Role::Rule => output.push_str("---\n\n"),
                _ => {
                    output.push_str(&entry.text);
                    output.push_str("\n\n");
                }
            }
        }
        if in_list {
            output.push('\n');
        }
    }
}
