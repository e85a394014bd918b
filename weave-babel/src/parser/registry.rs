//! Tag name → handler lookup

use super::handler::{HandlerDescriptor, HandlerKind, HandlerTraits};
use super::ParseError;
use crate::listener::Format;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// What the parser does with a tag that has no registered handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownTagPolicy {
    /// Keep the tag's content, drop the tag itself.
    #[default]
    #[serde(alias = "passthrough")]
    PassThrough,
    /// Abort the document with [`ParseError::UnknownTag`].
    Fail,
}

impl FromStr for UnknownTagPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass-through" | "passthrough" => Ok(UnknownTagPolicy::PassThrough),
            "fail" => Ok(UnknownTagPolicy::Fail),
            other => Err(format!(
                "unknown tag policy '{other}', expected 'pass-through' or 'fail'"
            )),
        }
    }
}

/// Registry of tag handlers
///
/// Maps tag names to [`HandlerDescriptor`]s. Lookups happen once per opened
/// tag. Names are matched exactly; front-ends are expected to normalise case.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, HandlerDescriptor>,
    unknown_tags: UnknownTagPolicy,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. An existing handler for `name` is replaced.
    pub fn register(&mut self, name: impl Into<String>, descriptor: HandlerDescriptor) {
        self.handlers.insert(name.into(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&HandlerDescriptor> {
        self.handlers.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Whether `name` opens a block-level construct. Unknown tags are inline.
    pub fn is_block(&self, name: &str) -> bool {
        self.get(name).is_some_and(HandlerDescriptor::is_block)
    }

    pub fn unknown_tag_policy(&self) -> UnknownTagPolicy {
        self.unknown_tags
    }

    pub fn set_unknown_tag_policy(&mut self, policy: UnknownTagPolicy) {
        self.unknown_tags = policy;
    }

    pub fn with_unknown_tag_policy(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    /// Registered tag names, sorted
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve the handler for an opening tag, applying the unknown-tag policy.
    pub fn resolve(&self, name: &str, open_tags: &[String]) -> Result<HandlerDescriptor, ParseError> {
        if let Some(descriptor) = self.get(name) {
            return Ok(*descriptor);
        }
        match self.unknown_tags {
            UnknownTagPolicy::PassThrough => {
                tracing::debug!(tag = name, "no handler registered, passing content through");
                Ok(HandlerDescriptor::pass_through())
            }
            UnknownTagPolicy::Fail => Err(ParseError::UnknownTag {
                name: name.to_string(),
                stack: open_tags.to_vec(),
            }),
        }
    }

    /// Registry with handlers for the (X)HTML vocabulary.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for level in 1..=9 {
            registry.register(format!("h{level}"), HandlerDescriptor::new(HandlerKind::Header));
        }

        let block = [
            ("p", HandlerKind::Paragraph),
            ("ul", HandlerKind::List { ordered: false }),
            ("ol", HandlerKind::List { ordered: true }),
            ("li", HandlerKind::ListItem),
            ("dl", HandlerKind::DefinitionList),
            ("dt", HandlerKind::DefinitionTerm),
            ("dd", HandlerKind::DefinitionDescription),
            ("blockquote", HandlerKind::Quotation),
            ("table", HandlerKind::Table),
            ("tr", HandlerKind::TableRow),
            ("td", HandlerKind::TableCell),
            ("th", HandlerKind::TableHeadCell),
            ("section", HandlerKind::Section),
            ("article", HandlerKind::Section),
            ("main", HandlerKind::Section),
            ("div", HandlerKind::Group),
            ("hr", HandlerKind::HorizontalRule),
        ];
        let inline = [
            ("strong", HandlerKind::Format(Format::Bold)),
            ("b", HandlerKind::Format(Format::Bold)),
            ("em", HandlerKind::Format(Format::Italic)),
            ("i", HandlerKind::Format(Format::Italic)),
            ("s", HandlerKind::Format(Format::Strikeout)),
            ("del", HandlerKind::Format(Format::Strikeout)),
            ("strike", HandlerKind::Format(Format::Strikeout)),
            ("u", HandlerKind::Format(Format::Underline)),
            ("ins", HandlerKind::Format(Format::Underline)),
            ("sup", HandlerKind::Format(Format::Superscript)),
            ("sub", HandlerKind::Format(Format::Subscript)),
            ("tt", HandlerKind::Format(Format::Monospace)),
            ("a", HandlerKind::Link),
            ("img", HandlerKind::Image),
            ("br", HandlerKind::LineBreak),
        ];
        for (name, kind) in block.into_iter().chain(inline) {
            registry.register(name, HandlerDescriptor::new(kind));
        }

        let transparent_block = HandlerDescriptor::with_traits(
            HandlerKind::PassThrough,
            HandlerTraits::new(false, true, false),
        );
        for name in ["html", "body", "thead", "tbody", "tfoot", "center"] {
            registry.register(name, transparent_block);
        }
        for name in ["span", "font"] {
            registry.register(name, HandlerDescriptor::pass_through());
        }

        registry
    }
}
