//! Text cleanup: the final pass over rendered output, plus the inline
//! helpers renderers use to clean individual headings and lines.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Marker symbols treated like emoji at the start of a line.
const MARKER_SYMBOLS: &str = "★☆●○■□◆◇▪▫▶►▸▹•◦✓✔✗✘➤➜→⇒※✦✧❖";

static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\p{Emoji_Modifier}\p{Regional_Indicator}\x{FE0F}\x{200D}\x{20E3}]")
        .expect("valid regex")
});
static PICTOGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Extended_Pictographic}").expect("valid regex"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("valid regex"));
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").expect("valid regex"));
static STRIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~]+)~~").expect("valid regex"));
static EMPHASIS_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s][^*]*)\*").expect("valid regex"));
static EMPHASIS_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^\w])_([^_\s][^_]*)_([^\w]|$)").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization only
    Minimal,
    /// NFC, invisible-character removal, trailing-space trim, newline limit 4
    #[default]
    Standard,
    /// Standard plus private-use removal and a tighter newline limit
    Aggressive,
}

/// Options for the final text pass.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove zero-width spaces, joiners outside emoji and BOMs
    pub remove_zero_width: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Remove Private Use Area (PUA) characters
    pub remove_pua: bool,

    /// Trim trailing spaces and tabs on every line
    pub trim_trailing_spaces: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_zero_width: false,
            remove_replacement_char: false,
            remove_pua: false,
            trim_trailing_spaces: false,
            max_consecutive_newlines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_zero_width: true,
            remove_replacement_char: true,
            remove_pua: false,
            trim_trailing_spaces: true,
            max_consecutive_newlines: 4,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            remove_zero_width: true,
            remove_replacement_char: true,
            remove_pua: true,
            trim_trailing_spaces: true,
            max_consecutive_newlines: 2,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.remove_zero_width {
            result = remove_zero_width(&result);
        }
        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }
        if self.options.remove_pua {
            result.retain(|c| !is_private_use(c));
        }
        if self.options.trim_trailing_spaces {
            result = result
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n");
        }
        if self.options.max_consecutive_newlines > 0 {
            result = limit_newlines(&result, self.options.max_consecutive_newlines as usize);
        }

        result.trim_matches('\n').trim_end().to_string()
    }
}

/// Collapse runs of more than `max` newlines down to exactly `max`.
///
/// Applying it twice gives the same result as applying it once.
pub fn limit_newlines(text: &str, max: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= max {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }
    out
}

fn remove_zero_width(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_emoji = false;
    for c in text.chars() {
        match c {
            '\u{200B}' | '\u{200C}' | '\u{2060}' | '\u{FEFF}' => continue,
            // Keep joiners that glue emoji sequences together.
            '\u{200D}' if !prev_emoji => continue,
            _ => {}
        }
        prev_emoji = is_symbol_char(c);
        out.push(c);
    }
    out
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}

/// Check if a character is an emoji or a list/marker symbol.
pub fn is_symbol_char(c: char) -> bool {
    if MARKER_SYMBOLS.contains(c) {
        return true;
    }
    let mut buf = [0u8; 4];
    EMOJI.is_match(c.encode_utf8(&mut buf))
}

/// Check if a character is a pictographic emoji. Marker glyphs such as
/// bullets and arrows do not count.
pub fn is_emoji_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    PICTOGRAPH.is_match(c.encode_utf8(&mut buf))
}

/// Remove emoji, including modifiers, joiners and variation selectors.
pub fn strip_emoji(text: &str) -> String {
    EMOJI.replace_all(text, "").into_owned()
}

/// Strip inline Markdown: images, links, strong, emphasis, strikethrough
/// and code spans keep their text and lose their markers.
pub fn strip_inline_markdown(text: &str) -> String {
    let text = IMAGE.replace_all(text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = STRONG.replace_all(&text, "$1$2");
    let text = STRIKE.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = EMPHASIS_STAR.replace_all(&text, "$1");
    EMPHASIS_UNDERSCORE
        .replace_all(&text, "$1$2$3")
        .into_owned()
}

/// Clean a heading for use as a section or document title.
///
/// Strips inline Markdown, emoji and marker symbols, collapses whitespace
/// and trims leading punctuation.
pub fn clean_heading_text(text: &str) -> String {
    let text = strip_inline_markdown(text);
    let text: String = strip_emoji(&text)
        .chars()
        .filter(|c| !MARKER_SYMBOLS.contains(*c))
        .collect();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    text.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ':' | '：' | '-' | '–' | '—' | '*' | '#' | '>' | '.' | '、' | '，' | ',')
    })
    .trim()
    .to_string()
}

/// Clean a body line: strip inline Markdown and collapse whitespace.
pub fn clean_inline(text: &str) -> String {
    strip_inline_markdown(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_normalization() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        let result = pipeline.process("cafe\u{0301}");
        assert_eq!(result, "café");
    }

    #[test]
    fn test_limit_newlines_idempotent() {
        let text = "a\n\n\n\n\n\n\nb\n\n\n\n\nc\n\nd";
        let once = limit_newlines(text, 4);
        assert_eq!(once, "a\n\n\n\nb\n\n\n\nc\n\nd");
        assert_eq!(limit_newlines(&once, 4), once);
    }

    #[test]
    fn test_standard_pipeline() {
        let pipeline = CleanupPipeline::default();
        let text = "\n\nHello\u{200B}World   \n\n\n\n\n\n\u{FFFD}Next\n";
        assert_eq!(pipeline.process(text), "HelloWorld\n\n\n\nNext");
    }

    #[test]
    fn test_zero_width_joiner_kept_in_emoji() {
        let family = "👨\u{200D}👩\u{200D}👧";
        assert_eq!(remove_zero_width(family), family);
        assert_eq!(remove_zero_width("a\u{200D}b"), "ab");
    }

    #[test]
    fn test_aggressive_removes_pua() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Aggressive);
        assert_eq!(pipeline.process("a\u{E000}b\n\n\n\nc"), "ab\n\nc");
    }

    #[test]
    fn test_symbol_chars() {
        assert!(is_symbol_char('🎯'));
        assert!(is_symbol_char('★'));
        assert!(is_symbol_char('•'));
        assert!(!is_symbol_char('a'));
        assert!(!is_symbol_char('中'));
        assert!(!is_symbol_char('#'));

        assert!(is_emoji_char('🎯'));
        assert!(is_emoji_char('🚀'));
        assert!(!is_emoji_char('•'));
        assert!(!is_emoji_char('◦'));
        assert!(!is_emoji_char('a'));
    }

    #[test]
    fn test_strip_inline_markdown() {
        assert_eq!(
            strip_inline_markdown("**bold** and *em* with `code` and [link](http://x)"),
            "bold and em with code and link"
        );
        assert_eq!(strip_inline_markdown("~~gone~~ __strong__"), "gone strong");
        assert_eq!(strip_inline_markdown("![alt](img.png)"), "alt");
        assert_eq!(strip_inline_markdown("snake_case_name stays"), "snake_case_name stays");
        assert_eq!(strip_inline_markdown("an _emphasis_ word"), "an emphasis word");
    }

    #[test]
    fn test_clean_heading_text() {
        assert_eq!(clean_heading_text("🚀 **Launch** plan"), "Launch plan");
        assert_eq!(clean_heading_text("：功能说明"), "功能说明");
        assert_eq!(clean_heading_text("⚠️ 注意事项"), "注意事项");
        assert_eq!(clean_heading_text("★ Stars ★"), "Stars");
        assert_eq!(clean_heading_text("1. Intro"), "1. Intro");
    }

    #[test]
    fn test_clean_inline() {
        assert_eq!(clean_inline("  some   **bold**  text "), "some bold text");
    }
}
