//! Output renderers.
//!
//! Every renderer is a pure function of its input structure; the only
//! exception is the detailed report's generation timestamp, which
//! [`TimestampMode`] can pin or omit.

mod cleanup;
mod detailed;
mod dialogue;
mod json;
mod options;
mod plaintext;
mod result;
mod simple;

pub use cleanup::{
    clean_heading_text, clean_inline, is_emoji_char, is_symbol_char, limit_newlines, strip_emoji,
    strip_inline_markdown, CleanupOptions, CleanupPipeline, CleanupPreset,
};
pub use detailed::{to_report, to_report_with_stats, ReportRenderer, DEFAULT_REPORT_TITLE};
pub use dialogue::{to_dialogue_article, to_request_template, EMPTY_DIALOGUE_DOCUMENT};
pub use json::{to_json, JsonFormat};
pub use options::{DialogueMode, HtmlStyle, RenderOptions, TimestampMode, TIMESTAMP_FORMAT};
pub use plaintext::{
    to_plaintext_surface, to_plaintext_surface_with_stats, PlaintextRenderer, CODE_LABEL,
    MAX_BLANK_RUN,
};
pub use result::{ExtractionStats, RenderResult};
pub use simple::{
    to_simple_markdown, to_simple_markdown_with_stats, SimpleRenderer, DEFAULT_SIMPLE_TITLE,
};
