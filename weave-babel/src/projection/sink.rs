//! The narrow target vocabulary.

use std::fmt;

/// Section depth a sink supports unless it says otherwise.
pub const DEFAULT_MAX_SECTION_LEVEL: usize = 5;

/// Numbering styles of a numbered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Numbering {
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

impl fmt::Display for Numbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Numbering::Decimal => "decimal",
            Numbering::LowerAlpha => "lower-alpha",
            Numbering::UpperAlpha => "upper-alpha",
            Numbering::LowerRoman => "lower-roman",
            Numbering::UpperRoman => "upper-roman",
        };
        f.write_str(name)
    }
}

/// A target that only knows sections, blocks and a handful of inline styles.
///
/// Methods come in open/close pairs where the close has a trailing
/// underscore (`section` / `section_`). Close methods of leveled constructs
/// receive the level again, since sinks are not required to track it.
///
/// Capability queries (`max_section_level`, `supports_numbering`,
/// `supports_anchors`) are consulted by [`SinkListener`](super::SinkListener)
/// before anything is emitted.
pub trait SectionSink {
    /// Deepest section level the sink can express.
    fn max_section_level(&self) -> usize {
        DEFAULT_MAX_SECTION_LEVEL
    }

    fn supports_numbering(&self, numbering: Numbering) -> bool {
        numbering == Numbering::Decimal
    }

    fn supports_anchors(&self) -> bool {
        false
    }

    /// Document head. Called once, before `body`.
    fn head(&mut self, title: Option<&str>);
    fn body(&mut self);
    fn body_(&mut self);

    fn section(&mut self, level: usize);
    fn section_(&mut self, level: usize);
    fn section_title(&mut self, level: usize);
    fn section_title_(&mut self, level: usize);

    fn paragraph(&mut self);
    fn paragraph_(&mut self);

    fn list(&mut self);
    fn list_(&mut self);
    fn numbered_list(&mut self, numbering: Numbering);
    fn numbered_list_(&mut self);
    fn list_item(&mut self);
    fn list_item_(&mut self);

    fn definition_list(&mut self);
    fn definition_list_(&mut self);
    fn defined_term(&mut self);
    fn defined_term_(&mut self);
    fn definition(&mut self);
    fn definition_(&mut self);

    fn bold(&mut self);
    fn bold_(&mut self);
    fn italic(&mut self);
    fn italic_(&mut self);
    fn monospaced(&mut self);
    fn monospaced_(&mut self);

    /// Preformatted block.
    fn verbatim(&mut self, content: &str);
    fn text(&mut self, text: &str);
    /// Text passed through unescaped. `syntax` names its markup language.
    fn raw_text(&mut self, text: &str, syntax: &str);
    fn horizontal_rule(&mut self);

    fn table(&mut self);
    fn table_(&mut self);
    fn table_row(&mut self);
    fn table_row_(&mut self);
    fn table_cell(&mut self);
    fn table_cell_(&mut self);
    fn table_header_cell(&mut self);
    fn table_header_cell_(&mut self);

    fn link(&mut self, href: &str);
    fn link_(&mut self);
    fn figure(&mut self, src: &str, alt: Option<&str>);

    /// Only called when `supports_anchors` is true.
    fn anchor(&mut self, _name: &str) {}
}
