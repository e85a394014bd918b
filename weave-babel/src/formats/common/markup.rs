//! Markup tree → parser tokens.
//!
//! Both markup front-ends (`html` through html5ever, `xhtml` through
//! roxmltree) first convert their library's DOM into the small
//! [`MarkupNode`] tree below, then share [`tokenize`] to produce the token
//! stream for the structural parser.
//!
//! # Rules
//!
//!     - `<head>` produces no tokens. Its `<title>` and `<meta name content>`
//!       become document metadata. `<script>` and `<style>` are skipped.
//!     - `<pre>` is one block verbatim token, `<code>` outside of it an inline
//!       verbatim token.
//!     - Text is split into words, spaces and special symbols.
//!     - Whitespace-only text between blocks with k >= 2 newlines is a run of
//!       k - 1 blank lines; with fewer it is dropped.
//!     - Inline content sitting directly in a block container (`body`, `div`, `section`,
//!       `blockquote`, the document root) is wrapped in a synthetic `<p>`.
//!     - Spaces touching the edge of a block element are dropped.

use crate::listener::{MetaData, Parameters};
use crate::parser::{ContentToken, HandlerRegistry, Token};

/// Element or text node of a parsed markup document.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element {
        name: String,
        attributes: Parameters,
        children: Vec<MarkupNode>,
    },
    Text(String),
}

impl MarkupNode {
    pub fn element(name: impl Into<String>, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Element {
            name: name.into(),
            attributes: Parameters::new(),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        MarkupNode::Text(text.into())
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            MarkupNode::Text(text) => text.clone(),
            MarkupNode::Element { children, .. } => {
                children.iter().map(MarkupNode::text_content).collect()
            }
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            MarkupNode::Element { name, .. } => Some(name),
            MarkupNode::Text(_) => None,
        }
    }
}

/// Token stream plus the metadata collected from `<head>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenizedDocument {
    pub metadata: MetaData,
    pub tokens: Vec<Token>,
}

/// Elements whose stray inline children get wrapped in a paragraph.
const WRAPPING_CONTAINERS: &[&str] = &[
    "html",
    "body",
    "div",
    "section",
    "article",
    "main",
    "blockquote",
];
/// Elements dropped together with their content.
const SKIPPED: &[&str] = &["script", "style", "template"];

pub fn tokenize(nodes: &[MarkupNode], registry: &HandlerRegistry) -> TokenizedDocument {
    let mut tokenizer = Tokenizer {
        registry,
        document: TokenizedDocument::default(),
    };
    tokenizer.block_children(nodes);
    let mut document = tokenizer.document;
    document.tokens = trim_block_edges(document.tokens, registry);
    document
}

struct Tokenizer<'r> {
    registry: &'r HandlerRegistry,
    document: TokenizedDocument,
}

impl Tokenizer<'_> {
    fn push(&mut self, token: Token) {
        self.document.tokens.push(token);
    }

    fn is_block(&self, node: &MarkupNode) -> bool {
        match node.name() {
            Some(name) => {
                name == "pre"
                    || name == "head"
                    || SKIPPED.contains(&name)
                    || self.registry.is_block(name)
            }
            None => false,
        }
    }

    /// Children of a wrapping container: inline runs become paragraphs.
    fn block_children(&mut self, children: &[MarkupNode]) {
        let mut run: Vec<&MarkupNode> = Vec::new();
        for child in children {
            if self.is_block(child) {
                self.inline_run(&run);
                run.clear();
                self.node(child);
            } else {
                run.push(child);
            }
        }
        self.inline_run(&run);
    }

    fn inline_run(&mut self, run: &[&MarkupNode]) {
        let Some(first) = run.iter().position(|node| !is_blank(node)) else {
            for node in run {
                self.separator(node);
            }
            return;
        };
        let last = run
            .iter()
            .rposition(|node| !is_blank(node))
            .unwrap_or(first);

        for node in &run[..first] {
            self.separator(node);
        }
        self.push(Token::open("p"));
        for node in &run[first..=last] {
            self.node(node);
        }
        self.push(Token::close("p"));
        for node in &run[last + 1..] {
            self.separator(node);
        }
    }

    /// Whitespace between blocks: blank lines or nothing.
    fn separator(&mut self, node: &MarkupNode) {
        if let MarkupNode::Text(text) = node {
            let newlines = text.matches('\n').count();
            if newlines >= 2 {
                self.push(Token::BlankLines(newlines - 1));
            }
        }
    }

    fn node(&mut self, node: &MarkupNode) {
        match node {
            MarkupNode::Text(text) => self.text(text),
            MarkupNode::Element {
                name,
                attributes,
                children,
            } => self.element(name, attributes, children),
        }
    }

    fn text(&mut self, text: &str) {
        for token in ContentToken::split_text(text) {
            self.push(Token::Content(token));
        }
    }

    fn element(&mut self, name: &str, attributes: &Parameters, children: &[MarkupNode]) {
        match name {
            "head" => self.head(children),
            _ if SKIPPED.contains(&name) => {}
            "pre" => {
                let content: String = children.iter().map(MarkupNode::text_content).collect();
                self.push(Token::Content(ContentToken::Verbatim {
                    content: content.strip_prefix('\n').unwrap_or(&content).to_string(),
                    inline: false,
                    parameters: attributes.clone(),
                }));
            }
            "code" => {
                let content: String = children.iter().map(MarkupNode::text_content).collect();
                self.push(Token::Content(ContentToken::Verbatim {
                    content,
                    inline: true,
                    parameters: attributes.clone(),
                }));
            }
            _ => {
                self.push(Token::open_with(name, attributes.clone()));
                if WRAPPING_CONTAINERS.contains(&name) {
                    self.block_children(children);
                } else {
                    self.mixed_children(children);
                }
                self.push(Token::close(name));
            }
        }
    }

    /// Children of any other element. Whitespace next to a block sibling is a
    /// separator, everything else is content.
    fn mixed_children(&mut self, children: &[MarkupNode]) {
        let blocks: Vec<bool> = children.iter().map(|child| self.is_block(child)).collect();
        for (index, child) in children.iter().enumerate() {
            let after_block = index > 0 && blocks[index - 1];
            let before_block = blocks.get(index + 1).copied().unwrap_or(false);
            if is_blank(child) && (after_block || before_block) {
                self.separator(child);
            } else {
                self.node(child);
            }
        }
    }

    fn head(&mut self, children: &[MarkupNode]) {
        for child in children {
            let MarkupNode::Element {
                name,
                attributes,
                children,
            } = child
            else {
                continue;
            };
            match name.as_str() {
                "title" => {
                    let title: String = children.iter().map(MarkupNode::text_content).collect();
                    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !title.is_empty() {
                        self.document.metadata.insert("title", title);
                    }
                }
                "meta" => {
                    if let (Some(key), Some(value)) =
                        (attributes.get("name"), attributes.get("content"))
                    {
                        self.document.metadata.insert(key, value);
                    }
                }
                _ => {}
            }
        }
    }
}

fn is_blank(node: &MarkupNode) -> bool {
    matches!(node, MarkupNode::Text(text) if text.trim().is_empty())
}

fn is_block_tag(token: Option<&Token>, registry: &HandlerRegistry) -> bool {
    match token {
        Some(Token::Open { name, .. }) | Some(Token::Close { name }) => registry.is_block(name),
        Some(Token::BlankLines(_)) | None => true,
        Some(Token::Content(ContentToken::Verbatim { inline, .. })) => !inline,
        Some(Token::Content(_)) => false,
    }
}

/// Drop spaces that directly follow or precede a block boundary.
fn trim_block_edges(tokens: Vec<Token>, registry: &HandlerRegistry) -> Vec<Token> {
    let mut trimmed: Vec<Token> = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        if token == &Token::Content(ContentToken::Space)
            && (is_block_tag(trimmed.last(), registry)
                || trimmed.last() == Some(&Token::Content(ContentToken::Space))
                || is_block_tag(tokens.get(index + 1), registry))
        {
            continue;
        }
        trimmed.push(token.clone());
    }
    trimmed
}
