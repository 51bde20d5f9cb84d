//! Rendering options and configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};

use super::{CleanupOptions, CleanupPreset};
use crate::aggregate::PreamblePolicy;
use crate::error::Error;

/// Timestamp format used in the detailed report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default length limit for emoji-prefixed "likely headings".
pub const DEFAULT_EMOJI_HEADING_CHARS: usize = 30;

/// Options for rendering aggregated content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Generation timestamp in the detailed report
    pub timestamp: TimestampMode,

    /// Final text cleanup (None = leave output untouched)
    pub cleanup: Option<CleanupOptions>,

    /// Override the style's preamble policy
    pub preamble_policy: Option<PreamblePolicy>,

    /// Override whether emoji-prefixed lines open sections
    pub emoji_headings: Option<bool>,

    /// Maximum characters of an emoji-prefixed heading
    pub emoji_heading_max_chars: usize,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp mode.
    pub fn with_timestamp(mut self, mode: TimestampMode) -> Self {
        self.timestamp = mode;
        self
    }

    /// Pin the timestamp to a fixed value.
    pub fn with_fixed_timestamp(mut self, at: NaiveDateTime) -> Self {
        self.timestamp = TimestampMode::Fixed(at);
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Override the preamble policy.
    pub fn with_preamble_policy(mut self, policy: PreamblePolicy) -> Self {
        self.preamble_policy = Some(policy);
        self
    }

    /// Override emoji heading detection.
    pub fn with_emoji_headings(mut self, enabled: bool) -> Self {
        self.emoji_headings = Some(enabled);
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Resolve the preamble policy for a style.
    pub fn preamble_for(&self, style: HtmlStyle) -> PreamblePolicy {
        self.preamble_policy.unwrap_or(match style {
            HtmlStyle::Detailed => PreamblePolicy::LeadingSection,
            HtmlStyle::Simple => PreamblePolicy::Discard,
        })
    }

    /// Resolve the emoji heading limit for a style, if enabled.
    pub fn emoji_headings_for(&self, style: HtmlStyle) -> Option<usize> {
        let enabled = self
            .emoji_headings
            .unwrap_or(style == HtmlStyle::Simple);
        enabled.then_some(self.emoji_heading_max_chars)
    }

    /// Apply the cleanup pass, if configured.
    pub fn finish(&self, text: String) -> String {
        match self.cleanup {
            Some(ref cleanup) => super::CleanupPipeline::new(cleanup.clone()).process(&text),
            None => text,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timestamp: TimestampMode::Now,
            cleanup: Some(CleanupOptions::default()),
            preamble_policy: None,
            emoji_headings: None,
            emoji_heading_max_chars: DEFAULT_EMOJI_HEADING_CHARS,
            collect_stats: false,
        }
    }
}

/// Generation timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampMode {
    /// Local wall-clock time at render
    #[default]
    Now,
    /// A pinned time, for reproducible output
    Fixed(NaiveDateTime),
    /// No timestamp line
    Omit,
}

impl TimestampMode {
    /// Formatted timestamp, or None when omitted.
    pub fn render(&self) -> Option<String> {
        match self {
            TimestampMode::Now => Some(Local::now().format(TIMESTAMP_FORMAT).to_string()),
            TimestampMode::Fixed(at) => Some(at.format(TIMESTAMP_FORMAT).to_string()),
            TimestampMode::Omit => None,
        }
    }
}

/// Layout of the HTML pipeline output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlStyle {
    /// Box-framed knowledge-base report
    #[default]
    Detailed,
    /// Compact heading/list Markdown
    Simple,
}

/// Template of the dialogue pipeline output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueMode {
    /// Knowledge article built from detected turns
    #[default]
    Dialogue,
    /// Fixed outline template for a single request
    Simple,
}

impl FromStr for HtmlStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detailed" | "report" => Ok(HtmlStyle::Detailed),
            "simple" | "compact" => Ok(HtmlStyle::Simple),
            other => Err(Error::InvalidArgument(format!("Unknown HTML style: {}", other))),
        }
    }
}

impl FromStr for DialogueMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dialogue" => Ok(DialogueMode::Dialogue),
            "simple" => Ok(DialogueMode::Simple),
            other => Err(Error::InvalidArgument(format!(
                "Unknown dialogue mode: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for HtmlStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HtmlStyle::Detailed => "detailed",
            HtmlStyle::Simple => "simple",
        })
    }
}

impl fmt::Display for DialogueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DialogueMode::Dialogue => "dialogue",
            DialogueMode::Simple => "simple",
        })
    }
}
