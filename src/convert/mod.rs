//! Pipeline registry.
//!
//! Every reformatting pipeline is exposed as a [`DocumentConverter`] so
//! callers (the CLI, the note service) can select one by name.
//!
//! # Example
//!
//! ```
//! use notefmt::convert::{ConverterRegistry, ConvertOptions};
//!
//! fn main() -> notefmt::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let result = registry.convert("md", "# Title\nHello world.", &ConvertOptions::default())?;
//!     assert!(result.content.contains("【Title】"));
//!     Ok(())
//! }
//! ```

mod pipelines;

pub use pipelines::{DialogueConverter, HtmlConverter, MarkdownConverter};

use crate::detect::detect_format;
use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::parser::ParseOptions;
use crate::render::{ExtractionStats, RenderOptions};
use std::collections::HashMap;
use std::sync::Arc;

/// Options for a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Scanning options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scanning options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Aggregated document metadata
    pub metadata: Metadata,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self {
            content,
            metadata,
            stats: None,
            mime_type: "text/plain",
        }
    }

    /// Set extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// A named reformatting pipeline.
pub trait DocumentConverter: Send + Sync {
    /// Canonical pipeline name.
    fn name(&self) -> &str;

    /// Alternative names.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for listings.
    fn description(&self) -> &str;

    /// Convert input text.
    fn convert(&self, input: &str, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Check if this converter answers to the given name.
    fn answers_to(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.name() == name || self.aliases().iter().any(|a| *a == name)
    }
}

/// Registry of pipelines, looked up by name or alias.
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with every built-in pipeline.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HtmlConverter::detailed()));
        registry.register(Arc::new(HtmlConverter::simple()));
        registry.register(Arc::new(MarkdownConverter::new()));
        registry.register(Arc::new(DialogueConverter::dialogue()));
        registry.register(Arc::new(DialogueConverter::simple()));
        registry
    }

    /// Register a converter under its name and aliases.
    ///
    /// A later registration replaces an earlier one with the same name.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        self.converters.retain(|c| c.name() != converter.name());
        for alias in converter.aliases() {
            self.by_name
                .insert(alias.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter.clone());
        self.converters.push(converter);
    }

    /// Get a converter by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if a name or alias is registered.
    pub fn supports(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Registered converters in registration order.
    pub fn converters(&self) -> impl Iterator<Item = &Arc<dyn DocumentConverter>> {
        self.converters.iter()
    }

    /// Convert input with the named pipeline.
    pub fn convert(
        &self,
        name: &str,
        input: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get(name)
            .ok_or_else(|| Error::UnknownPipeline(name.to_string()))?;
        converter.convert(input, options)
    }

    /// Detect the input format and convert with the matching pipeline.
    pub fn convert_auto(&self, input: &str, options: &ConvertOptions) -> Result<ConvertResult> {
        let format = detect_format(input);
        log::debug!("Detected {} input", format);
        self.convert(format.pipeline_name(), input, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
