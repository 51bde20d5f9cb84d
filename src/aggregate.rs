//! Section aggregation over a classified block stream.

use serde::{Deserialize, Serialize};

use crate::classify::ClassifiedBlock;
use crate::model::{Document, Metadata, Role, Section, SectionEntry};
use crate::render::clean_heading_text;

/// What happens to content that arrives before the first heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreamblePolicy {
    /// Drop it
    Discard,
    /// Keep it in an implicit untitled leading section
    #[default]
    LeadingSection,
}

#[derive(Debug)]
enum State {
    NoOpenSection,
    SectionOpen(Section),
}

/// Two-state section builder. Use a fresh one per document.
#[derive(Debug)]
pub struct SectionAggregator {
    preamble_policy: PreamblePolicy,
    emoji_heading_max_chars: Option<usize>,
    state: State,
    preamble: Section,
    sections: Vec<Section>,
    metadata: Metadata,
}

impl SectionAggregator {
    /// Create an aggregator with the given preamble policy.
    pub fn new(preamble_policy: PreamblePolicy) -> Self {
        Self {
            preamble_policy,
            emoji_heading_max_chars: None,
            state: State::NoOpenSection,
            preamble: Section::untitled(),
            sections: Vec::new(),
            metadata: Metadata::default(),
        }
    }

    /// Treat short emoji-prefixed content as a heading.
    pub fn with_emoji_headings(mut self, max_chars: usize) -> Self {
        self.emoji_heading_max_chars = Some(max_chars);
        self
    }

    /// Feed the next classified block.
    pub fn push(&mut self, item: &ClassifiedBlock) {
        self.metadata.block_count += 1;
        let text = item.block.text.as_str();

        match item.role {
            Role::Skip => {
                self.metadata.skipped_count += 1;
            }
            Role::Blank => {}
            Role::Title => {
                if self.metadata.title.is_none() {
                    self.metadata.title = Some(cleaned_title(text));
                } else {
                    log::debug!("Ignoring additional title {:?}", text);
                }
            }
            Role::Heading => self.open_section(text),
            _ if self.is_likely_heading(item) => {
                log::debug!("Treating emoji-prefixed {:?} as a heading", text);
                self.open_section(text);
            }
            role => {
                let entry = SectionEntry {
                    role,
                    text: text.to_string(),
                    emphasis: item.emphasis,
                };
                self.append(entry);
            }
        }
    }

    /// Seal the open section and return the document.
    pub fn finish(mut self) -> Document {
        match std::mem::replace(&mut self.state, State::NoOpenSection) {
            State::SectionOpen(section) => self.sections.push(section),
            State::NoOpenSection => self.seal_preamble(),
        }
        log::debug!(
            "Aggregated {} blocks into {} sections ({} skipped, {} discarded)",
            self.metadata.block_count,
            self.sections.len(),
            self.metadata.skipped_count,
            self.metadata.discarded_count
        );
        Document {
            metadata: self.metadata,
            sections: self.sections,
        }
    }

    fn open_section(&mut self, raw_title: &str) {
        let next = State::SectionOpen(Section::titled(cleaned_title(raw_title)));
        match std::mem::replace(&mut self.state, next) {
            State::SectionOpen(section) => self.sections.push(section),
            State::NoOpenSection => self.seal_preamble(),
        }
    }

    fn append(&mut self, entry: SectionEntry) {
        match &mut self.state {
            State::SectionOpen(section) => section.push(entry),
            State::NoOpenSection => match self.preamble_policy {
                PreamblePolicy::LeadingSection => self.preamble.push(entry),
                PreamblePolicy::Discard => {
                    log::debug!("Discarding preamble {:?}", entry.text);
                    self.metadata.discarded_count += 1;
                }
            },
        }
    }

    fn seal_preamble(&mut self) {
        let preamble = std::mem::take(&mut self.preamble);
        if !preamble.is_empty() {
            self.sections.push(preamble);
        }
    }

    fn is_likely_heading(&self, item: &ClassifiedBlock) -> bool {
        match self.emoji_heading_max_chars {
            Some(max) => {
                item.role != Role::Code
                    && item.block.starts_with_emoji()
                    && item.block.char_len() <= max
            }
            None => false,
        }
    }
}

fn cleaned_title(raw: &str) -> String {
    let cleaned = clean_heading_text(raw);
    if cleaned.is_empty() {
        raw.trim().to_string()
    } else {
        cleaned
    }
}

/// Aggregate a classified stream in one call.
pub fn aggregate(blocks: &[ClassifiedBlock], policy: PreamblePolicy) -> Document {
    let mut aggregator = SectionAggregator::new(policy);
    for block in blocks {
        aggregator.push(block);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockHints};

    fn item(role: Role, text: &str) -> ClassifiedBlock {
        ClassifiedBlock {
            block: Block::html(text, BlockHints::default()),
            role,
            emphasis: false,
        }
    }

    #[test]
    fn test_title_is_metadata_only() {
        let doc = aggregate(
            &[
                item(Role::Title, "Doc Title"),
                item(Role::Title, "Second Title"),
                item(Role::Paragraph, "Some content here that is long enough."),
            ],
            PreamblePolicy::LeadingSection,
        );
        assert_eq!(doc.metadata.title.as_deref(), Some("Doc Title"));
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.sections[0].title, None);
        assert_eq!(doc.entry_count(), 1);
    }

    #[test]
    fn test_preamble_discarded() {
        let doc = aggregate(
            &[
                item(Role::Paragraph, "before any heading text"),
                item(Role::Heading, "Section"),
                item(Role::ListItem, "one"),
            ],
            PreamblePolicy::Discard,
        );
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.sections[0].title.as_deref(), Some("Section"));
        assert_eq!(doc.metadata.discarded_count, 1);
    }

    #[test]
    fn test_empty_titled_section_is_sealed() {
        let doc = aggregate(
            &[item(Role::Heading, "Empty"), item(Role::Heading, "Full")],
            PreamblePolicy::LeadingSection,
        );
        assert_eq!(doc.section_count(), 2);
        assert!(doc.sections[0].is_empty());
    }

    #[test]
    fn test_empty_preamble_not_sealed() {
        let doc = aggregate(
            &[item(Role::Skip, "x"), item(Role::Heading, "Only")],
            PreamblePolicy::LeadingSection,
        );
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.metadata.skipped_count, 1);
        assert_eq!(doc.metadata.block_count, 2);
    }

    #[test]
    fn test_content_order_matches_input() {
        let doc = aggregate(
            &[
                item(Role::Heading, "S"),
                item(Role::Paragraph, "a paragraph of text"),
                item(Role::Code, "let a = 1;"),
                item(Role::ListItem, "item"),
            ],
            PreamblePolicy::Discard,
        );
        let texts: Vec<_> = doc.sections[0].entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["a paragraph of text", "let a = 1;", "item"]);
    }

    #[test]
    fn test_heading_title_is_cleaned() {
        let doc = aggregate(
            &[item(Role::Heading, "🚀 **Launch** plan")],
            PreamblePolicy::Discard,
        );
        assert_eq!(doc.sections[0].title.as_deref(), Some("Launch plan"));
    }

    #[test]
    fn test_emoji_headings() {
        let blocks = [
            item(Role::Paragraph, "🎯 目标"),
            item(Role::ListItem, "first goal"),
            item(Role::Code, "🎯 not a heading"),
        ];

        let mut aggregator = SectionAggregator::new(PreamblePolicy::Discard).with_emoji_headings(30);
        for b in &blocks {
            aggregator.push(b);
        }
        let doc = aggregator.finish();
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.sections[0].title.as_deref(), Some("目标"));
        assert_eq!(doc.sections[0].entries.len(), 2);

        // Disabled by default
        let doc = aggregate(&blocks, PreamblePolicy::Discard);
        assert_eq!(doc.section_count(), 0);
    }

    #[test]
    fn test_marker_glyph_lines_stay_content() {
        let blocks = [
            item(Role::Heading, "Shopping"),
            item(Role::Paragraph, "• buy milk and eggs"),
            item(Role::Paragraph, "→ then the bakery"),
        ];

        let mut aggregator = SectionAggregator::new(PreamblePolicy::Discard).with_emoji_headings(30);
        for b in &blocks {
            aggregator.push(b);
        }
        let doc = aggregator.finish();
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.sections[0].entries.len(), 2);
        assert_eq!(doc.sections[0].entries[0].text, "• buy milk and eggs");
    }

    #[test]
    fn test_emphasis_carried_to_entry() {
        let mut bold = item(Role::Paragraph, "Important");
        bold.emphasis = true;
        let doc = aggregate(&[item(Role::Heading, "S"), bold], PreamblePolicy::Discard);
        assert!(doc.sections[0].entries[0].emphasis);
    }
}
