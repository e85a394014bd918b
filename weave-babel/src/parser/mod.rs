//! Structural parser: tag tokens in, balanced events out.
//!
//! # The High-Level Concept
//!
//!     A markup front-end produces a flat stream of open/close/content tokens.
//!     The parser keeps a stack with one frame per open tag. Opening a tag
//!     looks up its handler, pushes a frame and emits the handler's begin
//!     event; closing a tag pops the frame and emits the end event that was
//!     parked on it at open time. Content tokens bypass the stack entirely.
//!
//! # Blank Lines
//!
//!     Blank source lines accumulate into a pending run. The run is flushed as
//!     a single `OnEmptyLines` event:
//!     - before the begin event of a handler that absorbs blank lines,
//!     - before any content token,
//!     - before any end event,
//!     - when the document finishes.
//!     Handlers that do not absorb blank lines therefore open first and the
//!     run lands inside them.
//!
//! # Errors
//!
//!     Closing anything but the innermost open tag is fatal and reported with
//!     the path of open tags. So is finishing with tags still open. The parser
//!     never recovers locally; the caller abandons the document.

pub mod handler;
pub mod registry;
pub mod token;

pub use handler::{HandlerDescriptor, HandlerKind, HandlerTraits, TagContext};
pub use registry::{HandlerRegistry, UnknownTagPolicy};
pub use token::{ContentToken, Token};

use crate::listener::{Event, Listener, MetaData, Parameters};

/// Fatal structural errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed nesting: </{found}> closes while <{expected}> is open (open tags: {})", .stack.join(" > "))]
    MalformedNesting {
        expected: String,
        found: String,
        stack: Vec<String>,
    },
    #[error("malformed nesting: </{found}> closes but no tag is open")]
    UnmatchedClose { found: String },
    #[error("malformed nesting: document ended with open tags: {}", .stack.join(" > "))]
    UnclosedTags { stack: Vec<String> },
    #[error("no handler registered for <{name}> (open tags: {})", .stack.join(" > "))]
    UnknownTag { name: String, stack: Vec<String> },
}

/// One open tag.
#[derive(Debug)]
struct Frame {
    descriptor: HandlerDescriptor,
    context: TagContext,
    /// End event computed when the tag opened.
    closing: Option<Event>,
}

/// Stack machine turning tag tokens into listener events.
pub struct StructuralParser<'r, L: Listener> {
    registry: &'r HandlerRegistry,
    listener: L,
    stack: Vec<Frame>,
    pending_blank_lines: usize,
}

impl<'r, L: Listener> StructuralParser<'r, L> {
    pub fn new(registry: &'r HandlerRegistry, listener: L) -> Self {
        Self {
            registry,
            listener,
            stack: Vec::new(),
            pending_blank_lines: 0,
        }
    }

    /// Names of the open tags, outermost first.
    pub fn open_tags(&self) -> Vec<String> {
        self.stack
            .iter()
            .map(|frame| frame.context.name.clone())
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Block trait of the handler registered for `name`.
    pub fn is_block(&self, name: &str) -> bool {
        self.registry.is_block(name)
    }

    /// Block trait of the innermost open tag, if any.
    pub fn in_block(&self) -> Option<bool> {
        self.stack.last().map(|frame| frame.descriptor.is_block())
    }

    pub fn open_tag(&mut self, name: &str, parameters: Parameters) -> Result<(), ParseError> {
        let descriptor = self.registry.resolve(name, &self.open_tags())?;
        let context = TagContext::new(name, parameters);
        let parent = self.stack.last().map(|frame| frame.descriptor.kind);
        let entry = descriptor.enter(&context, parent);

        if descriptor.traits.absorbs_blank_lines {
            self.flush_blank_lines();
        }
        if let Some(event) = &entry.begin {
            self.listener.on_event(event);
        }

        tracing::trace!(tag = name, depth = self.stack.len() + 1, "push");
        self.stack.push(Frame {
            descriptor,
            context,
            closing: entry.end,
        });
        Ok(())
    }

    pub fn close_tag(&mut self, name: &str) -> Result<(), ParseError> {
        let top = match self.stack.last() {
            Some(frame) => frame.context.name.as_str(),
            None => {
                return Err(ParseError::UnmatchedClose {
                    found: name.to_string(),
                })
            }
        };
        if top != name {
            return Err(ParseError::MalformedNesting {
                expected: top.to_string(),
                found: name.to_string(),
                stack: self.open_tags(),
            });
        }

        self.flush_blank_lines();
        if let Some(frame) = self.stack.pop() {
            tracing::trace!(tag = name, depth = self.stack.len(), "pop");
            if let Some(event) = &frame.closing {
                self.listener.on_event(event);
            }
        }
        Ok(())
    }

    pub fn content(&mut self, token: ContentToken) {
        self.flush_blank_lines();
        self.listener.on_event(&token.into_event());
    }

    pub fn blank_lines(&mut self, count: usize) {
        self.pending_blank_lines += count;
    }

    pub fn feed(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::Open { name, parameters } => self.open_tag(&name, parameters),
            Token::Close { name } => self.close_tag(&name),
            Token::Content(content) => {
                self.content(content);
                Ok(())
            }
            Token::BlankLines(count) => {
                self.blank_lines(count);
                Ok(())
            }
        }
    }

    /// Flush pending output and give back the listener.
    pub fn finish(mut self) -> Result<L, ParseError> {
        if !self.stack.is_empty() {
            return Err(ParseError::UnclosedTags {
                stack: self.open_tags(),
            });
        }
        self.flush_blank_lines();
        Ok(self.listener)
    }

    fn flush_blank_lines(&mut self) {
        if self.pending_blank_lines > 0 {
            let count = std::mem::take(&mut self.pending_blank_lines);
            self.listener.on_event(&Event::OnEmptyLines { count });
        }
    }
}

/// Run a token stream through a fresh parser.
pub fn parse_tokens<L, I>(tokens: I, registry: &HandlerRegistry, listener: L) -> Result<L, ParseError>
where
    L: Listener,
    I: IntoIterator<Item = Token>,
{
    let mut parser = StructuralParser::new(registry, listener);
    for token in tokens {
        parser.feed(token)?;
    }
    parser.finish()
}

/// Like [`parse_tokens`], wrapped in `BeginDocument`/`EndDocument`.
pub fn parse_document<L, I>(
    tokens: I,
    metadata: MetaData,
    registry: &HandlerRegistry,
    mut listener: L,
) -> Result<L, ParseError>
where
    L: Listener,
    I: IntoIterator<Item = Token>,
{
    listener.on_event(&Event::BeginDocument {
        metadata: metadata.clone(),
    });
    let mut listener = parse_tokens(tokens, registry, listener)?;
    listener.on_event(&Event::EndDocument { metadata });
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{EventRecorder, HeaderLevel};

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs.iter().copied().collect()
    }

    fn run(tokens: Vec<Token>) -> Result<Vec<Event>, ParseError> {
        let registry = HandlerRegistry::with_defaults();
        parse_tokens(tokens, &registry, EventRecorder::new()).map(EventRecorder::into_events)
    }

    #[test]
    fn header_with_trailing_blank_lines() {
        let registry = HandlerRegistry::with_defaults();
        let mut parser = StructuralParser::new(&registry, EventRecorder::new());
        parser.open_tag("h2", params(&[("id", "intro")])).unwrap();
        parser.close_tag("h2").unwrap();
        parser.blank_lines(2);
        let events = parser.finish().unwrap().into_events();

        let level = HeaderLevel::new(2).unwrap();
        assert_eq!(
            events,
            vec![
                Event::BeginHeader {
                    level,
                    id: "intro".to_string(),
                    parameters: params(&[("id", "intro")]),
                },
                Event::EndHeader {
                    level,
                    id: "intro".to_string(),
                    parameters: params(&[("id", "intro")]),
                },
                Event::OnEmptyLines { count: 2 },
            ]
        );
    }

    #[test]
    fn absorbing_handler_flushes_blank_lines_before_begin() {
        let events = run(vec![
            Token::BlankLines(1),
            Token::BlankLines(2),
            Token::open("p"),
            Token::word("x"),
            Token::close("p"),
        ])
        .unwrap();
        assert_eq!(events[0], Event::OnEmptyLines { count: 3 });
        assert!(matches!(events[1], Event::BeginParagraph { .. }));
    }

    #[test]
    fn non_absorbing_handler_opens_before_pending_blank_lines() {
        let events = run(vec![
            Token::open("ul"),
            Token::BlankLines(1),
            Token::open("li"),
            Token::word("x"),
            Token::close("li"),
            Token::close("ul"),
        ])
        .unwrap();
        let names: Vec<_> = events.iter().map(Event::name).collect();
        assert_eq!(
            names,
            vec![
                "begin_list",
                "begin_list_item",
                "on_empty_lines",
                "on_word",
                "end_list_item",
                "end_list",
            ]
        );
    }

    #[test]
    fn closing_wrong_tag_is_malformed_nesting() {
        let registry = HandlerRegistry::with_defaults();
        let mut parser = StructuralParser::new(&registry, EventRecorder::new());
        parser.open_tag("ul", Parameters::new()).unwrap();
        parser.open_tag("li", Parameters::new()).unwrap();
        let err = parser.close_tag("h2").unwrap_err();

        assert_eq!(
            err,
            ParseError::MalformedNesting {
                expected: "li".to_string(),
                found: "h2".to_string(),
                stack: vec!["ul".to_string(), "li".to_string()],
            }
        );
        let message = err.to_string();
        assert!(message.contains("</h2>"));
        assert!(message.contains("<li>"));
        assert!(message.contains("ul > li"));
    }

    #[test]
    fn close_without_open_is_reported() {
        let err = run(vec![Token::close("p")]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnmatchedClose {
                found: "p".to_string()
            }
        );
    }

    #[test]
    fn unclosed_tags_fail_at_finish() {
        let err = run(vec![Token::open("div"), Token::open("p")]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnclosedTags {
                stack: vec!["div".to_string(), "p".to_string()]
            }
        );
    }

    #[test]
    fn unknown_tags_pass_content_through() {
        let events = run(vec![
            Token::open("p"),
            Token::open("blink"),
            Token::word("hi"),
            Token::close("blink"),
            Token::close("p"),
        ])
        .unwrap();
        let names: Vec<_> = events.iter().map(Event::name).collect();
        assert_eq!(names, vec!["begin_paragraph", "on_word", "end_paragraph"]);
    }

    #[test]
    fn unknown_tags_fail_under_strict_policy() {
        let registry = HandlerRegistry::with_defaults().with_unknown_tag_policy(UnknownTagPolicy::Fail);
        let err = parse_tokens(
            vec![Token::open("p"), Token::open("blink")],
            &registry,
            EventRecorder::new(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, ParseError::UnknownTag { name, .. } if name == "blink"));
    }

    #[test]
    fn void_tags_emit_singletons() {
        let events = run(vec![
            Token::open("p"),
            Token::word("a"),
            Token::open("br"),
            Token::close("br"),
            Token::open_with("img", params(&[("src", "logo.png")])),
            Token::close("img"),
            Token::close("p"),
            Token::open("hr"),
            Token::close("hr"),
        ])
        .unwrap();
        let names: Vec<_> = events.iter().map(Event::name).collect();
        assert_eq!(
            names,
            vec![
                "begin_paragraph",
                "on_word",
                "on_new_line",
                "on_image",
                "end_paragraph",
                "on_horizontal_line",
            ]
        );
    }

    #[test]
    fn quotation_paragraphs_become_lines() {
        let events = run(vec![
            Token::open("blockquote"),
            Token::open("p"),
            Token::word("quoted"),
            Token::close("p"),
            Token::close("blockquote"),
        ])
        .unwrap();
        let names: Vec<_> = events.iter().map(Event::name).collect();
        assert_eq!(
            names,
            vec![
                "begin_quotation",
                "begin_quotation_line",
                "on_word",
                "end_quotation_line",
                "end_quotation",
            ]
        );
    }

    #[test]
    fn parse_document_wraps_the_stream() {
        let registry = HandlerRegistry::with_defaults();
        let metadata = params(&[("title", "Doc")]);
        let events = parse_document(
            vec![Token::open("p"), Token::close("p")],
            metadata.clone(),
            &registry,
            EventRecorder::new(),
        )
        .unwrap()
        .into_events();
        assert_eq!(events.first(), Some(&Event::BeginDocument { metadata: metadata.clone() }));
        assert_eq!(events.last(), Some(&Event::EndDocument { metadata }));
    }

    #[test]
    fn parser_reports_block_context() {
        let registry = HandlerRegistry::with_defaults();
        let mut parser = StructuralParser::new(&registry, EventRecorder::new());
        assert_eq!(parser.in_block(), None);
        parser.open_tag("div", Parameters::new()).unwrap();
        assert_eq!(parser.in_block(), Some(true));
        parser.open_tag("em", Parameters::new()).unwrap();
        assert_eq!(parser.in_block(), Some(false));
        assert!(parser.is_block("table"));
        assert_eq!(parser.depth(), 2);
        assert_eq!(parser.open_tags(), vec!["div", "em"]);
    }

    mod properties {
        use super::*;
        use crate::listener::EventRole;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Node {
            Tag(&'static str, Vec<Node>),
            Text(String),
            Blank(usize),
        }

        fn node() -> impl Strategy<Value = Node> {
            let leaf = prop_oneof![
                "[a-z]{1,6}".prop_map(Node::Text),
                (1usize..4).prop_map(Node::Blank),
            ];
            leaf.prop_recursive(4, 32, 4, |inner| {
                (
                    prop::sample::select(vec![
                        "p", "div", "ul", "li", "h3", "blockquote", "em", "a", "span", "table",
                        "td", "marquee",
                    ]),
                    prop::collection::vec(inner, 0..4),
                )
                    .prop_map(|(tag, children)| Node::Tag(tag, children))
            })
        }

        fn flatten(node: &Node, tokens: &mut Vec<Token>) {
            match node {
                Node::Tag(name, children) => {
                    tokens.push(Token::open(*name));
                    for child in children {
                        flatten(child, tokens);
                    }
                    tokens.push(Token::close(*name));
                }
                Node::Text(text) => tokens.push(Token::word(text.clone())),
                Node::Blank(count) => tokens.push(Token::BlankLines(*count)),
            }
        }

        proptest! {
            #[test]
            fn well_nested_tags_produce_balanced_events(nodes in prop::collection::vec(node(), 0..6)) {
                let mut tokens = Vec::new();
                for node in &nodes {
                    flatten(node, &mut tokens);
                }
                let events = run(tokens).unwrap();

                let mut open = Vec::new();
                for event in &events {
                    match event.role() {
                        EventRole::Begin => open.push(event.kind()),
                        EventRole::End => prop_assert_eq!(open.pop(), Some(event.kind())),
                        EventRole::Singleton => {}
                    }
                }
                prop_assert!(open.is_empty());
            }
        }
    }
}
