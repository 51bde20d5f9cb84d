//! Role classification for scanned blocks.
//!
//! An ordered rule table, first match wins:
//!
//! 1. large font → title
//! 2. medium font → heading
//! 3. bold outside code → subheading when the text has a colon or a
//!    subheading keyword, otherwise an emphasised paragraph
//! 4. monospace → code
//! 5. list item, or nested inside one → list item
//! 6. long enough → paragraph
//! 7. skip

use serde::Serialize;

use crate::model::{Block, FontSize, Role};
use crate::parser::ParseOptions;

/// A block together with its assigned role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedBlock {
    /// The scanned block
    pub block: Block,

    /// Assigned role
    pub role: Role,

    /// Bold paragraph that did not qualify as a subheading
    pub emphasis: bool,
}

/// Rule-table classifier.
#[derive(Debug, Clone)]
pub struct RoleClassifier<'a> {
    options: &'a ParseOptions,
}

impl<'a> RoleClassifier<'a> {
    /// Create a classifier over the given options.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self { options }
    }

    /// Assign a role to one block.
    pub fn classify(&self, block: &Block) -> (Role, bool) {
        let hints = &block.hints;

        if hints.font_size == FontSize::Large {
            return (Role::Title, false);
        }
        if hints.font_size == FontSize::Medium {
            return (Role::Heading, false);
        }
        if hints.bold && !hints.monospace {
            return if self.is_subheading_text(&block.text) {
                (Role::Subheading, false)
            } else {
                (Role::Paragraph, true)
            };
        }
        if hints.monospace {
            return (Role::Code, false);
        }
        if hints.list_item || hints.in_list {
            return (Role::ListItem, false);
        }
        if block.char_len() >= self.options.min_paragraph_chars {
            return (Role::Paragraph, false);
        }
        (Role::Skip, false)
    }

    /// Classify a block stream, keeping input order.
    pub fn classify_all(&self, blocks: Vec<Block>) -> Vec<ClassifiedBlock> {
        blocks
            .into_iter()
            .map(|block| {
                let (role, emphasis) = self.classify(&block);
                log::trace!("{:>12} {:?}", role.as_str(), block.text);
                ClassifiedBlock {
                    block,
                    role,
                    emphasis,
                }
            })
            .collect()
    }

    fn is_subheading_text(&self, text: &str) -> bool {
        if text.contains(':') || text.contains('：') {
            return true;
        }
        let lower = text.to_lowercase();
        self.options
            .subheading_keywords
            .iter()
            .any(|k| lower.contains(k.as_str()))
    }
}

/// Classify a block stream with the given options.
pub fn classify_blocks(blocks: Vec<Block>, options: &ParseOptions) -> Vec<ClassifiedBlock> {
    RoleClassifier::new(options).classify_all(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockHints;

    fn block(text: &str, hints: BlockHints) -> Block {
        Block::html(text, hints)
    }

    fn classify(b: &Block) -> (Role, bool) {
        let options = ParseOptions::default();
        RoleClassifier::new(&options).classify(b)
    }

    #[test]
    fn test_font_cues_come_first() {
        let large = BlockHints {
            font_size: FontSize::Large,
            bold: true,
            monospace: true,
            ..Default::default()
        };
        assert_eq!(classify(&block("Doc Title", large)).0, Role::Title);

        let medium = BlockHints {
            font_size: FontSize::Medium,
            list_item: true,
            ..Default::default()
        };
        assert_eq!(classify(&block("Section", medium)).0, Role::Heading);
    }

    #[test]
    fn test_bold_subheading_rules() {
        let bold = BlockHints {
            bold: true,
            ..Default::default()
        };
        assert_eq!(
            classify(&block("Step one: prepare", bold.clone())),
            (Role::Subheading, false)
        );
        assert_eq!(
            classify(&block("使用场景说明", bold.clone())),
            (Role::Subheading, false)
        );
        assert_eq!(
            classify(&block("Main Feature list", bold.clone())),
            (Role::Subheading, false)
        );
        assert_eq!(
            classify(&block("Important", bold.clone())),
            (Role::Paragraph, true)
        );
    }

    #[test]
    fn test_emoji_prefixed_bold_matches_plain_bold() {
        let bold = BlockHints {
            bold: true,
            ..Default::default()
        };
        let plain = classify(&block("重点内容", bold.clone()));
        let emoji = classify(&block("🎯 重点内容", bold));
        assert_eq!(plain, emoji);
    }

    #[test]
    fn test_code_rule() {
        let mono = BlockHints {
            monospace: true,
            ..Default::default()
        };
        assert_eq!(classify(&block("let x: u32 = 1;", mono)).0, Role::Code);
    }

    #[test]
    fn test_list_and_paragraph_rules() {
        let item = BlockHints {
            list_item: true,
            ..Default::default()
        };
        assert_eq!(classify(&block("short", item)).0, Role::ListItem);

        let nested = BlockHints {
            in_list: true,
            ..Default::default()
        };
        assert_eq!(classify(&block("inside", nested)).0, Role::ListItem);

        let plain = BlockHints::default();
        assert_eq!(
            classify(&block("Some content here that is long enough.", plain.clone())).0,
            Role::Paragraph
        );
        assert_eq!(classify(&block("too short", plain)).0, Role::Skip);
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let blocks = vec![
            block("first paragraph of enough length", BlockHints::default()),
            block("tiny", BlockHints::default()),
        ];
        let classified = classify_blocks(blocks, &ParseOptions::default());
        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].role, Role::Paragraph);
        assert_eq!(classified[1].role, Role::Skip);
    }
}
