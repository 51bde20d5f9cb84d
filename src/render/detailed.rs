//! Box-framed knowledge-base report.

use crate::error::Result;
use crate::model::{Document, Role, Section, SectionEntry};

use super::{clean_heading_text, ExtractionStats, RenderOptions, RenderResult};

/// Title used when the document has none.
pub const DEFAULT_REPORT_TITLE: &str = "未命名文档";

const FRAME_WIDTH: usize = 30;

/// Render a document as a detailed report.
pub fn to_report(doc: &Document, options: &RenderOptions) -> Result<String> {
    ReportRenderer::new(options.clone()).render(doc)
}

/// Render a document as a detailed report with statistics.
pub fn to_report_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    ReportRenderer::new(options).render_with_stats(doc)
}

/// Detailed report renderer.
pub struct ReportRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl ReportRenderer {
    /// Create a new report renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document with extraction statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        self.stats.block_count = doc.metadata.block_count;
        self.stats.count_text(&content);
        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        let heavy = "═".repeat(FRAME_WIDTH);

        let title = doc
            .metadata
            .title
            .as_deref()
            .unwrap_or(DEFAULT_REPORT_TITLE);
        output.push_str(&heavy);
        output.push('\n');
        output.push_str(&format!("【 {} 】\n", title));
        output.push_str(&heavy);
        output.push('\n');
        if let Some(stamp) = self.options.timestamp.render() {
            output.push_str(&format!("生成时间：{}\n", stamp));
        }
        output.push('\n');

        let mut number = 0;
        for section in &doc.sections {
            if section.title.is_some() {
                number += 1;
            }
            self.render_section(&mut output, section, number);
        }

        if doc.sections.is_empty() {
            output.push_str("（无可识别内容）\n");
        }

        Ok(self.options.finish(output))
    }

    fn render_section(&mut self, output: &mut String, section: &Section, number: usize) {
        if self.options.collect_stats {
            self.stats.section_count += 1;
        }
        if let Some(ref title) = section.title {
            if self.options.collect_stats {
                self.stats.add_role(Role::Heading);
            }
            output.push_str(&format!("\n■ {}. {}\n", number, title));
            output.push_str(&"─".repeat(FRAME_WIDTH));
            output.push_str("\n\n");
        }

        let mut previous: Option<Role> = None;
        for entry in &section.entries {
            if self.options.collect_stats {
                self.stats.add_role(entry.role);
            }
            // Close a run of list or code lines with a blank line.
            if let Some(prev) = previous {
                if is_run_role(prev) && !same_run(prev, entry.role) {
                    output.push('\n');
                }
            }
            self.render_entry(output, entry);
            previous = Some(entry.role);
        }
        if previous.is_some_and(is_run_role) {
            output.push('\n');
        }
    }

    fn render_entry(&self, output: &mut String, entry: &SectionEntry) {
        match entry.role {
            Role::Subheading => {
                output.push_str(&format!("▶ {}\n\n", clean_heading_text(&entry.text)));
            }
            Role::Paragraph if entry.emphasis => {
                output.push_str(&format!("★ {}\n\n", entry.text));
            }
            Role::ListItem | Role::OrderedItem => {
                output.push_str(&format!("  • {}\n", entry.text));
            }
            Role::Code => {
                output.push_str(&format!("    {}\n", entry.text));
            }
            Role::TableRow => {
                output.push_str(&format!("  │ {}\n", entry.text));
            }
            Role::Rule => {
                output.push_str(&"┈".repeat(FRAME_WIDTH));
                output.push_str("\n\n");
            }
            _ => {
                output.push_str(&entry.text);
                output.push_str("\n\n");
            }
        }
    }
}

fn is_run_role(role: Role) -> bool {
    matches!(
        role,
        Role::ListItem | Role::OrderedItem | Role::Code | Role::TableRow
    )
}

fn same_run(a: Role, b: Role) -> bool {
    let list = |r: Role| matches!(r, Role::ListItem | Role::OrderedItem);
    a == b || (list(a) && list(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TimestampMode;

    fn options() -> RenderOptions {
        RenderOptions::new().with_timestamp(TimestampMode::Omit)
    }

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.metadata.title = Some("Doc Title".to_string());
        let mut section = Section::titled("Install");
        section.push(SectionEntry::new(Role::Paragraph, "Follow these steps carefully."));
        section.push(SectionEntry::new(Role::ListItem, "download"));
        section.push(SectionEntry::new(Role::ListItem, "unpack"));
        section.push(SectionEntry::new(Role::Code, "make install"));
        section.push(SectionEntry::new(Role::Subheading, "注意：权限"));
        section.push(SectionEntry::emphasized("Run as admin"));
        doc.sections.push(section);
        doc
    }

    #[test]
    fn test_report_layout() {
        let output = to_report(&sample(), &options()).unwrap();
        assert!(output.starts_with(&"═".repeat(FRAME_WIDTH)));
        assert!(output.contains("【 Doc Title 】"));
        assert!(output.contains("■ 1. Install"));
        assert!(output.contains("  • download\n  • unpack\n\n    make install\n\n▶ 注意：权限"));
        assert!(output.contains("★ Run as admin"));
        assert!(!output.contains("生成时间"));
    }

    #[test]
    fn test_report_untitled_leading_section() {
        let mut doc = Document::new();
        let mut lead = Section::untitled();
        lead.push(SectionEntry::new(Role::Paragraph, "Preamble text that matters."));
        doc.sections.push(lead);
        doc.sections.push(Section::titled("First"));

        let output = to_report(&doc, &options()).unwrap();
        assert!(output.contains(&format!("【 {} 】", DEFAULT_REPORT_TITLE)));
        let pre = output.find("Preamble text").unwrap();
        let first = output.find("■ 1. First").unwrap();
        assert!(pre < first);
    }

    #[test]
    fn test_report_pinned_timestamp_is_stable() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let options = RenderOptions::new().with_fixed_timestamp(at);
        let a = to_report(&sample(), &options).unwrap();
        let b = to_report(&sample(), &options).unwrap();
        assert_eq!(a, b);
        assert!(a.contains("生成时间：2024-01-02 03:04:05"));
    }

    #[test]
    fn test_report_empty_document_is_not_empty() {
        let output = to_report(&Document::new(), &options()).unwrap();
        assert!(output.contains("（无可识别内容）"));
    }

    #[test]
    fn test_report_with_stats() {
        let result = to_report_with_stats(&sample(), &options()).unwrap();
        assert_eq!(result.stats.section_count, 1);
        assert_eq!(result.stats.list_item_count, 2);
        assert_eq!(result.stats.code_line_count, 1);
        // the titled section plus the subheading
        assert_eq!(result.stats.heading_count, 2);
    }
}
