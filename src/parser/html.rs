//! Markup scanner for notes-app HTML fragments.
//!
//! Walks the target block elements in document order and records the
//! presentational cues found inside each one: font-size spans, bold markers
//! and monospace markers. Nested target elements are visited on their own,
//! so a block's text never repeats the text of a block nested inside it.

use scraper::node::{Element, Node};
use scraper::{ElementRef, Html};

use crate::error::{Error, Result};
use crate::model::{Block, BlockHints, FontSize};

use super::ParseOptions;

/// Tags whose content never contributes visible text.
const IGNORED_TAGS: &[&str] = &["script", "style", "head", "title", "template", "noscript"];

/// Non-target tags that still separate words.
const BREAKING_TAGS: &[&str] = &[
    "br", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article", "blockquote", "pre",
    "table", "tr", "td", "th",
];

/// Tags that mark monospace text regardless of style.
const MONOSPACE_TAGS: &[&str] = &["code", "tt", "pre", "kbd", "samp"];

/// Pixel sizes for `<font size="1..7">`.
const FONT_SIZE_ATTR_PX: [f32; 7] = [10.0, 13.0, 16.0, 18.0, 24.0, 32.0, 48.0];

/// Scan an HTML fragment into blocks.
///
/// Returns [`Error::MarkupParse`] when the input carries text but none of it
/// sits inside a target element, and [`Error::InputTooLarge`] when the input
/// exceeds [`ParseOptions::max_input_bytes`].
pub fn scan_html(html: &str, options: &ParseOptions) -> Result<Vec<Block>> {
    if options.max_input_bytes > 0 && html.len() > options.max_input_bytes {
        return Err(Error::InputTooLarge(html.len(), options.max_input_bytes));
    }

    let fragment = Html::parse_fragment(html);
    let mut scanner = MarkupScanner::new(options);
    scanner.visit(fragment.root_element());

    if scanner.matched == 0 {
        let text = collapse_whitespace(&fragment.root_element().text().collect::<String>());
        if !text.is_empty() {
            return Err(Error::MarkupParse(
                "no block-level elements found in markup".to_string(),
            ));
        }
    }

    log::debug!(
        "Scanned {} elements, kept {} blocks",
        scanner.matched,
        scanner.blocks.len()
    );
    Ok(scanner.blocks)
}

/// Cues accumulated while collecting one block.
#[derive(Debug, Default)]
struct Cues {
    text: String,
    font_size: FontSize,
    bold: bool,
    monospace: bool,
}

/// Inherited presentation inside a block.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    monospace: bool,
    bold: bool,
    font_size: FontSize,
}

/// Pending work while collecting a block's text.
enum Step<'a> {
    Enter(ElementRef<'a>, Context),
    Text(&'a str, Context),
    Space,
}

struct MarkupScanner<'a> {
    options: &'a ParseOptions,
    blocks: Vec<Block>,
    matched: usize,
}

impl<'a> MarkupScanner<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            blocks: Vec::new(),
            matched: 0,
        }
    }

    /// Visit target elements in document order, parents before nested ones.
    fn visit(&mut self, root: ElementRef<'_>) {
        let mut stack: Vec<(ElementRef<'_>, bool)> = root
            .children()
            .rev()
            .filter_map(ElementRef::wrap)
            .map(|el| (el, false))
            .collect();

        while let Some((element, in_list)) = stack.pop() {
            let name = element.value().name();
            if IGNORED_TAGS.contains(&name) {
                continue;
            }

            let mut child_in_list = in_list;
            if self.options.is_target(name) {
                self.matched += 1;
                self.scan_block(element, in_list);
                child_in_list = in_list || name == "li";
            }
            stack.extend(
                element
                    .children()
                    .rev()
                    .filter_map(ElementRef::wrap)
                    .map(|el| (el, child_in_list)),
            );
        }
    }

    fn scan_block(&mut self, element: ElementRef<'_>, in_list: bool) {
        let value = element.value();
        let mono = self.is_monospace(value);

        let mut cues = Cues {
            font_size: self.font_bucket(value),
            monospace: mono,
            bold: !mono && is_bold(value),
            ..Default::default()
        };
        let context = Context {
            monospace: mono,
            ..Default::default()
        };
        self.collect(element, context, &mut cues);

        let text = collapse_whitespace(&cues.text);
        if text.chars().count() < self.options.min_block_chars {
            log::trace!("Dropping <{}> block {:?} as layout noise", value.name(), text);
            return;
        }

        let hints = BlockHints {
            font_size: cues.font_size,
            bold: cues.bold,
            monospace: cues.monospace,
            list_item: value.name() == "li",
            in_list,
            leading_symbols: Vec::new(),
        };
        self.blocks.push(Block::html(text, hints));
    }

    /// Gather a block's text. Cues only count where visible text sits
    /// under the marking element.
    fn collect(&self, element: ElementRef<'_>, context: Context, cues: &mut Cues) {
        let mut stack = Vec::new();
        push_children(&mut stack, element, context);

        while let Some(step) = stack.pop() {
            match step {
                Step::Space => cues.text.push(' '),
                Step::Text(text, ctx) => {
                    cues.text.push_str(text);
                    if text.trim().is_empty() {
                        continue;
                    }
                    cues.monospace |= ctx.monospace;
                    cues.bold |= ctx.bold;
                    cues.font_size = cues.font_size.max(ctx.font_size);
                }
                Step::Enter(child, ctx) => {
                    let value = child.value();
                    let name = value.name();
                    if IGNORED_TAGS.contains(&name) {
                        continue;
                    }
                    // Nested targets become their own blocks.
                    if self.options.is_target(name) {
                        cues.text.push(' ');
                        continue;
                    }

                    let mono = ctx.monospace || self.is_monospace(value);
                    let inner = Context {
                        monospace: mono,
                        bold: ctx.bold || (!mono && is_bold(value)),
                        font_size: ctx.font_size.max(self.font_bucket(value)),
                    };

                    let breaking = BREAKING_TAGS.contains(&name);
                    if breaking {
                        cues.text.push(' ');
                        stack.push(Step::Space);
                    }
                    push_children(&mut stack, child, inner);
                }
            }
        }
    }

    fn font_bucket(&self, element: &Element) -> FontSize {
        let px = style_value(element, "font-size")
            .and_then(|v| parse_font_size(&v))
            .or_else(|| {
                if element.name() != "font" {
                    return None;
                }
                element
                    .attr("size")
                    .and_then(|s| s.trim().parse::<usize>().ok())
                    .map(|n| FONT_SIZE_ATTR_PX[n.clamp(1, 7) - 1])
            });

        match px {
            Some(px) if px >= self.options.title_font_px => FontSize::Large,
            Some(px) if px >= self.options.heading_font_px => FontSize::Medium,
            _ => FontSize::Normal,
        }
    }

    fn is_monospace(&self, element: &Element) -> bool {
        if MONOSPACE_TAGS.contains(&element.name()) {
            return true;
        }
        if let Some(family) = style_value(element, "font-family") {
            if self.options.is_monospace_family(&family) {
                return true;
            }
        }
        element.name() == "font"
            && element
                .attr("face")
                .is_some_and(|face| self.options.is_monospace_family(face))
    }
}

fn is_bold(element: &Element) -> bool {
    if matches!(element.name(), "b" | "strong") {
        return true;
    }
    match style_value(element, "font-weight") {
        Some(weight) => match weight.as_str() {
            "bold" | "bolder" => true,
            other => other.parse::<u32>().is_ok_and(|w| w >= 600),
        },
        None => false,
    }
}

/// Push an element's children so they pop in document order.
fn push_children<'a>(stack: &mut Vec<Step<'a>>, element: ElementRef<'a>, context: Context) {
    for child in element.children().rev() {
        match child.value() {
            Node::Text(text) => stack.push(Step::Text(&**text, context)),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    stack.push(Step::Enter(child_el, context));
                }
            }
            _ => {}
        }
    }
}

/// Look up a declaration in an element's inline style.
fn style_value(element: &Element, property: &str) -> Option<String> {
    let style = element.attr("style")?;
    style.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(property) {
            Some(value.trim().trim_end_matches("!important").trim().to_lowercase())
        } else {
            None
        }
    })
}

/// Parse a CSS font-size value into pixels.
fn parse_font_size(value: &str) -> Option<f32> {
    match value {
        "xx-small" => return Some(9.0),
        "x-small" => return Some(10.0),
        "small" => return Some(13.0),
        "medium" => return Some(16.0),
        "large" => return Some(18.0),
        "x-large" => return Some(24.0),
        "xx-large" => return Some(32.0),
        _ => {}
    }

    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f32 = number.parse().ok()?;
    match unit.trim() {
        "" | "px" => Some(number),
        "pt" => Some(number * 4.0 / 3.0),
        "em" | "rem" => Some(number * 16.0),
        _ => None,
    }
}

/// Collapse runs of whitespace into single spaces and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
