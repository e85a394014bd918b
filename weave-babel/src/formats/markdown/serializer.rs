//! Markdown serialization
//!
//! Pipeline: events → [`SinkListener`] → [`MarkdownSink`] (Comrak AST) → Markdown string.
//!
//! Markdown has no section containers, so `section`/`section_` only matter for
//! the heading they frame. Inline content that lands directly in a block
//! container (a list item, the document) is given an implicit paragraph, which
//! is closed again as soon as a block opens or the container closes.

use crate::error::FormatError;
use crate::listener::{replay, Event};
use crate::options::RenderOptions;
use crate::projection::{SectionSink, SinkListener};
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeLink,
    NodeList, NodeTable, NodeValue, TableAlignment,
};
use comrak::{format_commonmark, Arena, ComrakOptions};
use std::cell::RefCell;

/// Markdown headings stop at six `#`.
const MARKDOWN_MAX_HEADING: usize = 6;

/// Serialize an event stream to Markdown
pub fn serialize_to_markdown(
    events: &[Event],
    options: &RenderOptions,
) -> Result<String, FormatError> {
    let arena = Arena::new();
    let mut listener = SinkListener::new(MarkdownSink::new(&arena, options));
    replay(events, &mut listener);
    let root = listener.into_sink().finish();

    let mut output = Vec::new();
    format_commonmark(root, &comrak_options(options), &mut output)
        .map_err(|e| FormatError::Serialization(format!("Comrak serialization failed: {e}")))?;

    let markdown = String::from_utf8(output)
        .map_err(|e| FormatError::Serialization(format!("UTF-8 conversion failed: {e}")))?;

    // Comrak separates consecutive lists with a marker comment
    Ok(markdown.replace("<!-- end list -->\n\n", ""))
}

fn comrak_options(render: &RenderOptions) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options.render.unsafe_ = true;
    // Comrak picks indented code for info-less blocks unless told otherwise.
    options.render.prefer_fenced = render.fenced_code;
    options
}

/// [`SectionSink`] building a Comrak AST in an arena.
pub struct MarkdownSink<'a> {
    arena: &'a Arena<AstNode<'a>>,
    root: &'a AstNode<'a>,
    current_parent: &'a AstNode<'a>,
    parent_stack: Vec<&'a AstNode<'a>>,
    /// Stack depth at which an implicit paragraph is the current parent.
    implicit_paragraph: Option<usize>,
    /// Text collected inside a monospaced run.
    code: Option<String>,
    title: Option<String>,
    fallback_title: Option<String>,
    fenced_code: bool,
    max_section_level: usize,
}

impl<'a> MarkdownSink<'a> {
    pub fn new(arena: &'a Arena<AstNode<'a>>, options: &RenderOptions) -> Self {
        let root = alloc(arena, NodeValue::Document);
        Self {
            arena,
            root,
            current_parent: root,
            parent_stack: Vec::new(),
            implicit_paragraph: None,
            code: None,
            title: None,
            fallback_title: options.title.clone(),
            fenced_code: options.fenced_code,
            max_section_level: options.max_section_level.min(MARKDOWN_MAX_HEADING),
        }
    }

    /// Root of the finished AST, with the title as front matter.
    pub fn finish(self) -> &'a AstNode<'a> {
        if let Some(title) = self.title.or(self.fallback_title) {
            // A JSON string is a valid YAML double-quoted scalar.
            let quoted = serde_json::Value::String(title).to_string();
            let yaml = format!("---\ntitle: {quoted}\n---\n\n");
            self.root.prepend(alloc(self.arena, NodeValue::FrontMatter(yaml)));
        }
        self.root
    }

    fn node(&self, value: NodeValue) -> &'a AstNode<'a> {
        alloc(self.arena, value)
    }

    fn push(&mut self, node: &'a AstNode<'a>) {
        self.current_parent.append(node);
        self.parent_stack.push(self.current_parent);
        self.current_parent = node;
    }

    fn pop(&mut self, what: &str) {
        match self.parent_stack.pop() {
            Some(parent) => self.current_parent = parent,
            None => tracing::warn!(what, "markdown sink closed a node that was never opened"),
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if self.implicit_paragraph == Some(self.parent_stack.len()) {
            self.implicit_paragraph = None;
            self.pop("implicit paragraph");
        }
    }

    fn open_block(&mut self, value: NodeValue) {
        self.close_implicit_paragraph();
        let node = self.node(value);
        self.push(node);
    }

    fn close_block(&mut self, what: &str) {
        self.close_implicit_paragraph();
        self.pop(what);
    }

    fn block_leaf(&mut self, value: NodeValue) {
        self.close_implicit_paragraph();
        self.current_parent.append(self.node(value));
    }

    fn ensure_inline_parent(&mut self) {
        let is_container = matches!(
            self.current_parent.data.borrow().value,
            NodeValue::Document | NodeValue::Item(_) | NodeValue::BlockQuote
        );
        if is_container {
            let paragraph = self.node(NodeValue::Paragraph);
            self.push(paragraph);
            self.implicit_paragraph = Some(self.parent_stack.len());
        }
    }

    fn open_inline(&mut self, value: NodeValue) {
        self.ensure_inline_parent();
        let node = self.node(value);
        self.push(node);
    }

    fn inline_leaf(&mut self, value: NodeValue) -> &'a AstNode<'a> {
        self.ensure_inline_parent();
        let node = self.node(value);
        self.current_parent.append(node);
        node
    }

    fn list_node(list_type: ListType) -> NodeList {
        NodeList {
            list_type,
            marker_offset: 0,
            padding: 0,
            start: 1,
            delimiter: ListDelimType::Period,
            bullet_char: b'-',
            tight: true,
        }
    }

    /// Fill in the column bookkeeping comrak needs to format a table.
    fn finish_table(&self) {
        let table = self.current_parent;
        let rows = table.children().count();
        let columns = table
            .children()
            .map(|row| row.children().count())
            .max()
            .unwrap_or(0);
        let mut data = table.data.borrow_mut();
        if let NodeValue::Table(ref mut node) = data.value {
            node.alignments = vec![TableAlignment::None; columns];
            node.num_columns = columns;
            node.num_rows = rows;
        }
    }
}

fn alloc<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

impl SectionSink for MarkdownSink<'_> {
    fn max_section_level(&self) -> usize {
        self.max_section_level
    }

    fn head(&mut self, title: Option<&str>) {
        self.title = title.map(str::to_string);
    }

    fn body(&mut self) {}

    fn body_(&mut self) {
        self.close_implicit_paragraph();
    }

    fn section(&mut self, _level: usize) {}

    fn section_(&mut self, _level: usize) {}

    fn section_title(&mut self, level: usize) {
        self.open_block(NodeValue::Heading(NodeHeading {
            level: level as u8,
            setext: false,
        }));
    }

    fn section_title_(&mut self, _level: usize) {
        self.close_block("heading");
    }

    fn paragraph(&mut self) {
        self.open_block(NodeValue::Paragraph);
    }

    fn paragraph_(&mut self) {
        self.close_block("paragraph");
    }

    fn list(&mut self) {
        self.open_block(NodeValue::List(Self::list_node(ListType::Bullet)));
    }

    fn list_(&mut self) {
        self.close_block("list");
    }

    fn numbered_list(&mut self, _numbering: crate::projection::Numbering) {
        self.open_block(NodeValue::List(Self::list_node(ListType::Ordered)));
    }

    fn numbered_list_(&mut self) {
        self.close_block("numbered list");
    }

    fn list_item(&mut self) {
        let list_type = match self.current_parent.data.borrow().value {
            NodeValue::List(ref list) => list.list_type,
            _ => ListType::Bullet,
        };
        self.open_block(NodeValue::Item(Self::list_node(list_type)));
    }

    fn list_item_(&mut self) {
        self.close_block("list item");
    }

    fn definition_list(&mut self) {
        self.close_implicit_paragraph();
    }

    fn definition_list_(&mut self) {
        self.close_implicit_paragraph();
    }

    // Terms render as a bold paragraph followed by a colon.
    fn defined_term(&mut self) {
        self.open_block(NodeValue::Paragraph);
        let strong = self.node(NodeValue::Strong);
        self.push(strong);
    }

    fn defined_term_(&mut self) {
        self.pop("defined term");
        self.current_parent
            .append(self.node(NodeValue::Text(":".to_string())));
        self.pop("defined term paragraph");
    }

    fn definition(&mut self) {}

    fn definition_(&mut self) {
        self.close_implicit_paragraph();
    }

    fn bold(&mut self) {
        self.open_inline(NodeValue::Strong);
    }

    fn bold_(&mut self) {
        self.pop("bold");
    }

    fn italic(&mut self) {
        self.open_inline(NodeValue::Emph);
    }

    fn italic_(&mut self) {
        self.pop("italic");
    }

    fn monospaced(&mut self) {
        self.code = Some(String::new());
    }

    fn monospaced_(&mut self) {
        if let Some(literal) = self.code.take() {
            self.inline_leaf(NodeValue::Code(NodeCode {
                num_backticks: 1,
                literal,
            }));
        }
    }

    fn verbatim(&mut self, content: &str) {
        let mut literal = content.to_string();
        if !literal.ends_with('\n') {
            literal.push('\n');
        }
        self.block_leaf(NodeValue::CodeBlock(NodeCodeBlock {
            fenced: self.fenced_code,
            fence_char: b'`',
            fence_length: 3,
            fence_offset: 0,
            info: String::new(),
            literal,
        }));
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = self.code.as_mut() {
            code.push_str(text);
            return;
        }
        if text == "\n" {
            self.inline_leaf(NodeValue::LineBreak);
        } else {
            self.inline_leaf(NodeValue::Text(text.replace('\n', " ")));
        }
    }

    fn raw_text(&mut self, text: &str, syntax: &str) {
        if syntax.starts_with("html") || syntax.starts_with("markdown") {
            self.inline_leaf(NodeValue::HtmlInline(text.to_string()));
        } else {
            tracing::debug!(syntax, "dropping raw text the markdown sink cannot embed");
        }
    }

    fn horizontal_rule(&mut self) {
        self.block_leaf(NodeValue::ThematicBreak);
    }

    fn table(&mut self) {
        self.open_block(NodeValue::Table(NodeTable {
            alignments: vec![],
            num_columns: 0,
            num_rows: 0,
            num_nonempty_cells: 0,
        }));
    }

    fn table_(&mut self) {
        self.close_implicit_paragraph();
        self.finish_table();
        self.pop("table");
    }

    fn table_row(&mut self) {
        // Comrak treats the first row as the header row.
        let first = self.current_parent.first_child().is_none();
        let row = self.node(NodeValue::TableRow(first));
        self.push(row);
    }

    fn table_row_(&mut self) {
        self.pop("table row");
    }

    fn table_cell(&mut self) {
        let cell = self.node(NodeValue::TableCell);
        self.push(cell);
    }

    fn table_cell_(&mut self) {
        self.pop("table cell");
    }

    fn table_header_cell(&mut self) {
        self.table_cell();
    }

    fn table_header_cell_(&mut self) {
        self.table_cell_();
    }

    fn link(&mut self, href: &str) {
        self.open_inline(NodeValue::Link(NodeLink {
            url: href.to_string(),
            title: String::new(),
        }));
    }

    fn link_(&mut self) {
        self.pop("link");
    }

    fn figure(&mut self, src: &str, alt: Option<&str>) {
        let image = self.inline_leaf(NodeValue::Image(NodeLink {
            url: src.to_string(),
            title: String::new(),
        }));
        if let Some(alt) = alt {
            image.append(self.node(NodeValue::Text(alt.to_string())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{Format, HeaderLevel, ListType as EventListType, Parameters};
    use comrak::parse_document;

    fn params() -> Parameters {
        Parameters::new()
    }

    fn render(events: &[Event]) -> String {
        serialize_to_markdown(events, &RenderOptions::default()).unwrap()
    }

    fn list(list_type: EventListType, items: &[&str]) -> Vec<Event> {
        let mut events = vec![Event::BeginList {
            list_type,
            parameters: params(),
        }];
        for item in items {
            events.push(Event::BeginListItem {
                parameters: params(),
            });
            events.push(Event::word(*item));
            events.push(Event::EndListItem {
                parameters: params(),
            });
        }
        events.push(Event::EndList {
            list_type,
            parameters: params(),
        });
        events
    }

    #[test]
    fn test_simple_paragraph_ast() {
        let md = render(&[
            Event::BeginParagraph {
                parameters: params(),
            },
            Event::word("simple"),
            Event::OnSpace,
            Event::word("paragraph"),
            Event::EndParagraph {
                parameters: params(),
            },
        ]);

        let arena = Arena::new();
        let root = parse_document(&arena, &md, &ComrakOptions::default());
        let paragraph = root.first_child().unwrap();
        assert!(matches!(paragraph.data.borrow().value, NodeValue::Paragraph));
        assert_eq!(md.trim(), "simple paragraph");
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let level = HeaderLevel::new(9).unwrap();
        let options = RenderOptions {
            max_section_level: 9,
            ..RenderOptions::default()
        };
        let md = serialize_to_markdown(
            &[
                Event::begin_header(level, ""),
                Event::word("Deep"),
                Event::end_header(level, ""),
            ],
            &options,
        )
        .unwrap();

        let arena = Arena::new();
        let root = parse_document(&arena, &md, &ComrakOptions::default());
        let heading = root.first_child().unwrap();
        let NodeValue::Heading(ref heading) = heading.data.borrow().value else {
            panic!("expected a heading, got {md:?}");
        };
        assert_eq!(heading.level, 6);
    }

    #[test]
    fn test_list_items_get_implicit_paragraphs() {
        let md = render(&list(EventListType::Bulleted, &["one", "two"]));
        assert!(md.contains("- one"));
        assert!(md.contains("- two"));
    }

    #[test]
    fn test_roman_numbering_becomes_decimal() {
        let md = render(&list(EventListType::UpperRoman, &["one"]));
        assert!(md.contains("1. one"), "got {md:?}");
    }

    #[test]
    fn test_formats_and_inline_code() {
        let md = render(&[
            Event::BeginParagraph {
                parameters: params(),
            },
            Event::BeginFormat {
                format: Format::Bold,
                parameters: params(),
            },
            Event::word("bold"),
            Event::EndFormat {
                format: Format::Bold,
                parameters: params(),
            },
            Event::OnSpace,
            Event::BeginFormat {
                format: Format::Strikeout,
                parameters: params(),
            },
            Event::word("gone"),
            Event::EndFormat {
                format: Format::Strikeout,
                parameters: params(),
            },
            Event::OnSpace,
            Event::OnVerbatim {
                content: "cargo".to_string(),
                inline: true,
                parameters: params(),
            },
            Event::EndParagraph {
                parameters: params(),
            },
        ]);
        assert_eq!(md.trim(), "**bold** gone `cargo`");
    }

    #[test]
    fn test_title_becomes_front_matter() {
        let md = render(&[
            Event::BeginDocument {
                metadata: [("title", "Guide")].into_iter().collect(),
            },
            Event::EndDocument {
                metadata: params(),
            },
        ]);
        assert!(md.starts_with("---\ntitle: \"Guide\"\n---"), "got {md:?}");
    }

    #[test]
    fn test_front_matter_title_is_quoted() {
        let md = render(&[
            Event::BeginDocument {
                metadata: [("title", r#"Part 1: "Intro" #draft"#)].into_iter().collect(),
            },
            Event::EndDocument {
                metadata: params(),
            },
        ]);
        assert!(
            md.starts_with("---\ntitle: \"Part 1: \\\"Intro\\\" #draft\"\n---"),
            "got {md:?}"
        );
    }

    #[test]
    fn test_code_block_is_fenced() {
        let md = render(&[Event::OnVerbatim {
            content: "fn main() {}".to_string(),
            inline: false,
            parameters: params(),
        }]);
        assert!(md.contains("```\nfn main() {}\n```"), "got {md:?}");
    }

    #[test]
    fn test_table_has_header_row() {
        let cell = |text: &str, head: bool| {
            if head {
                vec![
                    Event::BeginTableHeadCell {
                        parameters: params(),
                    },
                    Event::word(text),
                    Event::EndTableHeadCell {
                        parameters: params(),
                    },
                ]
            } else {
                vec![
                    Event::BeginTableCell {
                        parameters: params(),
                    },
                    Event::word(text),
                    Event::EndTableCell {
                        parameters: params(),
                    },
                ]
            }
        };
        let mut events = vec![Event::BeginTable {
            parameters: params(),
        }];
        for (row, head) in [(["a", "b"], true), (["1", "2"], false)] {
            events.push(Event::BeginTableRow {
                parameters: params(),
            });
            for text in row {
                events.extend(cell(text, head));
            }
            events.push(Event::EndTableRow {
                parameters: params(),
            });
        }
        events.push(Event::EndTable {
            parameters: params(),
        });

        let md = render(&events);
        let mut options = ComrakOptions::default();
        options.extension.table = true;
        let arena = Arena::new();
        let root = parse_document(&arena, &md, &options);
        let table = root.first_child().unwrap();
        assert!(
            matches!(table.data.borrow().value, NodeValue::Table(_)),
            "got {md:?}"
        );
        assert_eq!(table.children().count(), 2);
    }
}
