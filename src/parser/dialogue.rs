//! Dialogue structure detection for copied assistant transcripts.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{DialogueTurn, KeyInfo, TurnRole};

/// Substrings that mark a line as a user prompt.
pub const USER_INDICATORS: &[&str] = &[
    "用户:", "用户：", "我:", "我：", "请", "帮我", "如何", "什么是", "能否",
];

/// Substrings that mark a line as an assistant reply.
pub const AI_INDICATORS: &[&str] = &[
    "AI:", "AI：", "助手:", "助手：", "回答:", "回答：", "解答:", "解答：", "建议:", "建议：",
    "方案:", "方案：",
];

/// Characters that end a title capture.
const TITLE_STOP: &str = r#""'“”‘’「」『』。！？!?；;，,\n"#;

static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let open = r#"["'“‘「『]?"#;
    [
        format!(r"标题[是为]?\s*[：:]?\s*{open}([^{TITLE_STOP}]+)"),
        format!(r"创建[^{TITLE_STOP}]*?[：:]\s*{open}([^{TITLE_STOP}]+)"),
        format!(r"创建\s*{open}([^{TITLE_STOP}]+)"),
        format!(r"名称[是为]?\s*[：:]?\s*{open}([^{TITLE_STOP}]+)"),
        format!(r"(?i)\btitle\s*(?:is\b|:)\s*{open}([^{TITLE_STOP}]+)"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static KEYWORD_CATEGORIES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"项目规划|产品开发|计划|方案|策略|设计|实现",
        r"学习|教程|指南|文档|笔记",
        r"技术|编程|开发|代码|算法",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Collapse whitespace runs and normalise typographic quotes.
pub fn clean_dialogue_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['“', '”'], "\"")
        .replace(['‘', '’'], "'")
}

/// Line-by-line turn detector with one open part at a time.
#[derive(Debug, Default)]
pub struct DialogueScanner {
    open: Option<DialogueTurn>,
    turns: Vec<DialogueTurn>,
}

impl DialogueScanner {
    /// Create a scanner with no open part.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line.
    pub fn push_line(&mut self, line: &str) {
        let line = clean_dialogue_text(line);
        if line.is_empty() {
            return;
        }

        let is_user = contains_any(&line, USER_INDICATORS);
        let is_ai = contains_any(&line, AI_INDICATORS);

        if is_user && !is_ai {
            self.start(TurnRole::User, line);
        } else if is_ai {
            self.start(TurnRole::Content, line);
        } else if let Some(open) = self.open.as_mut() {
            open.append(&line);
        } else {
            self.open = Some(DialogueTurn::new(TurnRole::Content, line));
        }
    }

    /// Seal the open part and return all turns in input order.
    pub fn finish(mut self) -> Vec<DialogueTurn> {
        if let Some(open) = self.open.take() {
            self.turns.push(open);
        }
        self.turns
    }

    fn start(&mut self, role: TurnRole, line: String) {
        if let Some(open) = self.open.take() {
            self.turns.push(open);
        }
        self.open = Some(DialogueTurn::new(role, line));
    }
}

/// Split a transcript into user and content turns.
pub fn detect_dialogue(text: &str) -> Vec<DialogueTurn> {
    let mut scanner = DialogueScanner::new();
    for line in text.lines() {
        scanner.push_line(line);
    }
    let turns = scanner.finish();
    log::debug!(
        "Detected {} dialogue turns ({} user)",
        turns.len(),
        turns.iter().filter(|t| t.is_user()).count()
    );
    turns
}

/// Extract a candidate title and topical keywords from the whole text.
pub fn extract_key_info(text: &str) -> KeyInfo {
    let cleaned = cleaned_lines(text);
    KeyInfo {
        title: extract_title(&cleaned),
        keywords: extract_keywords(&cleaned),
    }
}

/// Whitespace-clean each line, keeping line boundaries.
fn cleaned_lines(text: &str) -> String {
    text.lines()
        .map(clean_dialogue_text)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_title(text: &str) -> Option<String> {
    TITLE_PATTERNS.iter().find_map(|pattern| {
        let capture = pattern.captures(text)?.get(1)?;
        let title = capture
            .as_str()
            .trim()
            .trim_matches(|c: char| "\"'“”‘’「」『』".contains(c))
            .trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for category in KEYWORD_CATEGORIES.iter() {
        for found in category.find_iter(text) {
            if !keywords.iter().any(|k| k == found.as_str()) {
                keywords.push(found.as_str().to_string());
            }
        }
    }
    keywords
}

fn contains_any(line: &str, indicators: &[&str]) -> bool {
    indicators.iter().any(|i| line.contains(i))
}
