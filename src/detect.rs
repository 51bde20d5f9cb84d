//! Input format detection.

use std::sync::LazyLock;

use regex::Regex;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:div|p|ul|ol|li|span|br|b|strong|font|tt|code|h[1-6]|body|html)\b[^>]*/?>")
        .expect("valid regex")
});
static SPEAKER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:用户|我|AI|助手|User|Assistant)\s*[:：]").expect("valid regex")
});
static MARKDOWN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s{0,3}(?:#{1,6}\s+\S|```|~~~|[-*+]\s+\S|\d+\.\s+\S|\|.*\||(?:-{3,}|\*{3,}|_{3,})\s*$)")
        .expect("valid regex")
});

/// Detected kind of input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Notes-app HTML
    Html,
    /// Raw Markdown
    Markdown,
    /// Assistant dialogue transcript
    Dialogue,
    /// Anything else
    PlainText,
}

impl InputFormat {
    /// Name of the pipeline that handles this format.
    pub fn pipeline_name(&self) -> &'static str {
        match self {
            InputFormat::Html => "html-detailed",
            InputFormat::Markdown => "markdown",
            InputFormat::Dialogue => "dialogue",
            InputFormat::PlainText => "dialogue-simple",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            InputFormat::Html => "HTML",
            InputFormat::Markdown => "Markdown",
            InputFormat::Dialogue => "Dialogue",
            InputFormat::PlainText => "Plain text",
        })
    }
}

/// Detect the format of an input text.
///
/// HTML block tags win, then speaker labels at the start of a line, then
/// Markdown line syntax.
pub fn detect_format(text: &str) -> InputFormat {
    if HTML_TAG.is_match(text) {
        InputFormat::Html
    } else if SPEAKER_LABEL.is_match(text) {
        InputFormat::Dialogue
    } else if MARKDOWN_LINE.is_match(text) {
        InputFormat::Markdown
    } else {
        InputFormat::PlainText
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_html() {
        assert_eq!(detect_format("<div>hello</div>"), InputFormat::Html);
        assert_eq!(detect_format("<DIV style=\"x\">hi</DIV>"), InputFormat::Html);
        assert_eq!(detect_format("text<br>more"), InputFormat::Html);
    }

    #[test]
    fn test_detect_markdown() {
        assert_eq!(detect_format("# Title\n\nbody"), InputFormat::Markdown);
        assert_eq!(detect_format("intro\n- item"), InputFormat::Markdown);
        assert_eq!(detect_format("```\ncode\n```"), InputFormat::Markdown);
        assert_eq!(detect_format("| a | b |"), InputFormat::Markdown);
        assert_eq!(detect_format("1. first"), InputFormat::Markdown);
    }

    #[test]
    fn test_detect_dialogue() {
        assert_eq!(
            detect_format("用户: 请帮我创建一个笔记\nAI: 好的"),
            InputFormat::Dialogue
        );
        assert_eq!(detect_format("User: hi\nAssistant: hello"), InputFormat::Dialogue);
    }

    #[test]
    fn test_detect_plain_text() {
        assert_eq!(detect_format("请帮我创建一个项目规划笔记"), InputFormat::PlainText);
        assert_eq!(detect_format(""), InputFormat::PlainText);
        assert_eq!(detect_format("a < b and #hashtag"), InputFormat::PlainText);
    }

    #[test]
    fn test_pipeline_names() {
        assert_eq!(InputFormat::Html.pipeline_name(), "html-detailed");
        assert_eq!(InputFormat::PlainText.pipeline_name(), "dialogue-simple");
    }
}
