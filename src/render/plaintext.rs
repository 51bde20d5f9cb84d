//! Plain text with spacing for rich-text surfaces that do not render
//! Markdown.

use crate::error::Result;
use crate::model::Metadata;
use crate::parser::{MarkdownLine, MarkdownScanner};

use super::{
    clean_heading_text, clean_inline, limit_newlines, ExtractionStats, RenderOptions,
    RenderResult,
};

const DIVIDER_WIDTH: usize = 30;

/// Newline runs longer than this are collapsed.
pub const MAX_BLANK_RUN: usize = 4;

/// Label that replaces an opening code fence.
pub const CODE_LABEL: &str = "代码示例";

/// Transform Markdown into spaced plain text.
pub fn to_plaintext_surface(markdown: &str, options: &RenderOptions) -> Result<String> {
    PlaintextRenderer::new(options.clone()).render(markdown)
}

/// Transform Markdown into spaced plain text with statistics.
pub fn to_plaintext_surface_with_stats(
    markdown: &str,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    PlaintextRenderer::new(options).render_with_stats(markdown)
}

/// Line-by-line Markdown re-renderer.
pub struct PlaintextRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
    in_table: bool,
}

impl PlaintextRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
            in_table: false,
        }
    }

    /// Render Markdown source.
    pub fn render(mut self, markdown: &str) -> Result<String> {
        Ok(self.render_internal(markdown))
    }

    /// Render Markdown source with extraction statistics.
    pub fn render_with_stats(mut self, markdown: &str) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(markdown);
        self.stats.count_text(&content);
        Ok(RenderResult::new(content, Metadata::default(), self.stats))
    }

    fn render_internal(&mut self, markdown: &str) -> String {
        let mut output = String::with_capacity(markdown.len() * 2);
        let mut scanner = MarkdownScanner::new();

        for raw in markdown.lines() {
            let line = scanner.classify(raw);
            if self.options.collect_stats {
                self.stats.block_count += 1;
                self.stats.add_role(line.role());
            }

            if self.in_table && !line.is_table() {
                self.in_table = false;
                output.push('\n');
            }
            self.render_line(&mut output, &line);
        }

        let collapsed = limit_newlines(&output, MAX_BLANK_RUN);
        self.options.finish(collapsed)
    }

    fn render_line(&mut self, output: &mut String, line: &MarkdownLine<'_>) {
        match line {
            MarkdownLine::Blank => {}
            MarkdownLine::FenceOpen { language } => {
                match language {
                    Some(lang) => output.push_str(&format!("\n{}（{}）：\n\n", CODE_LABEL, lang)),
                    None => output.push_str(&format!("\n{}：\n\n", CODE_LABEL)),
                }
            }
            MarkdownLine::FenceClose => output.push('\n'),
            MarkdownLine::Code(text) => {
                output.push_str("    ");
                output.push_str(text);
                output.push('\n');
            }
            MarkdownLine::Heading { level, text } => {
                let title = heading_title(text);
                match level {
                    1 => {
                        let frame = "═".repeat(DIVIDER_WIDTH);
                        output.push_str(&format!("\n\n{frame}\n【{title}】\n{frame}\n\n"));
                    }
                    2 => {
                        let rule = "─".repeat(DIVIDER_WIDTH);
                        output.push_str(&format!("\n\n【{title}】\n{rule}\n\n"));
                    }
                    3 => output.push_str(&format!("\n◆ {title}\n\n")),
                    _ => output.push_str(&format!("▸ {title}\n\n")),
                }
            }
            MarkdownLine::Rule => {
                output.push('\n');
                output.push_str(&"─".repeat(DIVIDER_WIDTH));
                output.push_str("\n\n");
            }
            MarkdownLine::TableRow(cells) => {
                if !self.in_table {
                    self.in_table = true;
                    output.push('\n');
                }
                output.push_str(&table_row(cells));
                output.push('\n');
            }
            MarkdownLine::TableDelimiter => {
                self.in_table = true;
            }
            MarkdownLine::Bullet { nested, text } => {
                let marker = if *nested { "  ◦" } else { "•" };
                output.push_str(&format!("{} {}\n\n", marker, clean_inline(text)));
            }
            MarkdownLine::Ordered { number, text } => {
                output.push_str(&format!("  {}. {}\n\n", number, clean_inline(text)));
            }
            MarkdownLine::Paragraph(text) => {
                output.push('\n');
                output.push_str(&clean_inline(text));
                output.push_str("\n\n");
            }
        }
    }
}

fn heading_title(text: &str) -> String {
    let cleaned = clean_heading_text(text);
    if cleaned.is_empty() {
        clean_inline(text)
    } else {
        cleaned
    }
}

/// Render table cells as "first → second（rest，…）".
fn table_row(cells: &[&str]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|c| clean_inline(c))
        .filter(|c| !c.is_empty())
        .collect();

    let mut row = match cells.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second, ..] => format!("{} → {}", first, second),
    };
    if cells.len() > 2 {
        row.push_str(&format!("（{}）", cells[2..].join("，")));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> String {
        to_plaintext_surface(md, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_title_then_paragraph() {
        let output = render("# Title\nHello world.");
        let title = output.find("【Title】").unwrap();
        let body = output.find("Hello world.").unwrap();
        assert!(title < body);
    }

    #[test]
    fn test_heading_levels() {
        let output = render("## 🚀 **Second**\n### Third\n#### Fourth");
        assert!(output.contains("【Second】\n──────"));
        assert!(output.contains("◆ Third"));
        assert!(output.contains("▸ Fourth"));
    }

    #[test]
    fn test_code_fence() {
        let output = render("```python\n# comment\nprint(1)\n```\nafter");
        assert!(output.contains("代码示例（python）：\n\n    # comment\n    print(1)\n"));
        assert!(!output.contains("```"));
        assert!(!output.contains("【comment】"));
    }

    #[test]
    fn test_table() {
        let output = render("intro text\n| 中文 | English | Note |\n|---|---|---|\n| 你好 | **Hello** | greeting |\nafter table");
        assert!(output.contains("中文 → English（Note）"));
        assert!(output.contains("你好 → Hello（greeting）"));
        assert!(!output.contains("---"));
        assert!(output.contains("\n\nafter table"));
    }

    #[test]
    fn test_lists() {
        let output = render("- **bold** item\n  - nested `code`\n1. first\n2. second");
        assert!(output.contains("• bold item"));
        assert!(output.contains("  ◦ nested code"));
        assert!(output.contains("  1. first"));
        assert!(output.contains("  2. second"));
    }

    #[test]
    fn test_rule() {
        let output = render("above\n\n***\n\nbelow");
        assert!(output.contains(&"─".repeat(DIVIDER_WIDTH)));
        assert!(!output.contains("***"));
    }

    #[test]
    fn test_blank_runs_collapsed() {
        let output = render("one\n\n\n\n\n\n\n\n\ntwo");
        assert!(!output.contains("\n\n\n\n\n"));
        let again = render(&output);
        assert!(!again.contains("\n\n\n\n\n"));
    }

    #[test]
    fn test_unterminated_fence() {
        let output = render("```\nstill code");
        assert!(output.contains("    still code"));
    }

    #[test]
    fn test_with_stats() {
        let result =
            to_plaintext_surface_with_stats("# A\n- b\n- c\n```\nx\n```\n| a | b |", &RenderOptions::default())
                .unwrap();
        assert_eq!(result.stats.block_count, 7);
        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.stats.list_item_count, 2);
        assert_eq!(result.stats.code_line_count, 3);
        assert_eq!(result.stats.table_row_count, 1);
    }
}
