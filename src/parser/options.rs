//! Scanning and classification options.

/// Options for scanning and classifying input.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Element names collected by the markup scanner
    pub target_tags: Vec<String>,

    /// Minimum font size in px treated as a document title cue
    pub title_font_px: f32,

    /// Minimum font size in px treated as a section heading cue
    pub heading_font_px: f32,

    /// Font family names treated as monospace (lowercase substrings)
    pub monospace_families: Vec<String>,

    /// Blocks with fewer characters are dropped as layout noise
    pub min_block_chars: usize,

    /// Minimum characters for an unstyled block to count as a paragraph
    pub min_paragraph_chars: usize,

    /// Keywords that turn a bold block into a subheading
    pub subheading_keywords: Vec<String>,

    /// Maximum input size in bytes (0 = unlimited)
    pub max_input_bytes: usize,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scanned element names.
    pub fn with_target_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_tags = tags.into_iter().map(|t| t.into().to_lowercase()).collect();
        self
    }

    /// Set the title and heading font-size thresholds in px.
    pub fn with_font_thresholds(mut self, title_px: f32, heading_px: f32) -> Self {
        self.title_font_px = title_px;
        self.heading_font_px = heading_px.min(title_px);
        self
    }

    /// Add a monospace font family.
    pub fn with_monospace_family(mut self, family: impl Into<String>) -> Self {
        self.monospace_families.push(family.into().to_lowercase());
        self
    }

    /// Set the minimum block length.
    pub fn with_min_block_chars(mut self, chars: usize) -> Self {
        self.min_block_chars = chars;
        self
    }

    /// Set the minimum paragraph length.
    pub fn with_min_paragraph_chars(mut self, chars: usize) -> Self {
        self.min_paragraph_chars = chars;
        self
    }

    /// Add a subheading keyword.
    pub fn with_subheading_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.subheading_keywords.push(keyword.into().to_lowercase());
        self
    }

    /// Set the maximum input size in bytes.
    pub fn with_max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    /// Check if an element name is part of the target set.
    pub fn is_target(&self, tag: &str) -> bool {
        self.target_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Check if a font-family declaration names a monospace family.
    pub fn is_monospace_family(&self, family: &str) -> bool {
        let family = family.to_lowercase();
        self.monospace_families
            .iter()
            .any(|m| family.contains(m.as_str()))
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            target_tags: ["div", "p", "ul", "ol", "li"]
                .into_iter()
                .map(String::from)
                .collect(),
            title_font_px: 24.0,
            heading_font_px: 18.0,
            monospace_families: [
                "menlo",
                "monaco",
                "courier",
                "consolas",
                "sf mono",
                "monospace",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_block_chars: 3,
            min_paragraph_chars: 15,
            subheading_keywords: ["scenario", "feature", "场景", "功能"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_input_bytes: 8 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_defaults() {
        let options = ParseOptions::default();
        assert!(options.is_target("div"));
        assert!(options.is_target("LI"));
        assert!(!options.is_target("span"));
        assert_eq!(options.min_block_chars, 3);
        assert_eq!(options.min_paragraph_chars, 15);
    }

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_target_tags(["section", "P"])
            .with_font_thresholds(30.0, 20.0)
            .with_monospace_family("Fira Code")
            .with_subheading_keyword("Step");

        assert!(options.is_target("section"));
        assert!(options.is_target("p"));
        assert!(!options.is_target("div"));
        assert_eq!(options.title_font_px, 30.0);
        assert!(options.is_monospace_family("'Fira Code', serif"));
        assert!(options.subheading_keywords.contains(&"step".to_string()));
    }

    #[test]
    fn test_heading_threshold_never_exceeds_title() {
        let options = ParseOptions::new().with_font_thresholds(20.0, 28.0);
        assert_eq!(options.heading_font_px, 20.0);
    }

    #[test]
    fn test_monospace_family_matching() {
        let options = ParseOptions::default();
        assert!(options.is_monospace_family("Menlo-Regular"));
        assert!(options.is_monospace_family("\"Courier New\", monospace"));
        assert!(!options.is_monospace_family("Helvetica"));
    }
}
