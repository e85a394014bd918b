//! Per-tag handlers.
//!
//! A handler is described by a [`HandlerKind`] (what events the tag turns
//! into) and three fixed [`HandlerTraits`]. When a tag opens, the parser asks
//! the descriptor for an [`Entry`]: the event to emit now and the event to
//! emit when the tag closes. The closing event is computed at open time and
//! parked on the tag's stack frame, which is how begin-time values such as a
//! header level survive until a close token that carries no payload.

use crate::listener::{Event, Format, HeaderLevel, ListType, Parameters, ResourceReference};

/// What a tag means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Header,
    Paragraph,
    List { ordered: bool },
    ListItem,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Quotation,
    Section,
    Table,
    TableRow,
    TableCell,
    TableHeadCell,
    Group,
    Format(Format),
    Link,
    Image,
    LineBreak,
    HorizontalRule,
    PassThrough,
}

/// Behavior flags fixed when a handler is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerTraits {
    /// Flush pending blank lines before the begin event.
    pub absorbs_blank_lines: bool,
    /// Tag is block-level. Reported to callers; never an event by itself.
    pub block: bool,
    /// Tag contributes a begin/end pair. Unpaired tags only emit singletons.
    pub paired: bool,
}

impl HandlerTraits {
    pub const fn new(absorbs_blank_lines: bool, block: bool, paired: bool) -> Self {
        Self {
            absorbs_blank_lines,
            block,
            paired,
        }
    }
}

/// Registered handler: a kind plus its traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerDescriptor {
    pub kind: HandlerKind,
    pub traits: HandlerTraits,
}

impl HandlerDescriptor {
    /// Descriptor with the default traits of `kind`.
    pub fn new(kind: HandlerKind) -> Self {
        Self {
            kind,
            traits: default_traits(kind),
        }
    }

    pub fn with_traits(kind: HandlerKind, traits: HandlerTraits) -> Self {
        Self { kind, traits }
    }

    pub fn pass_through() -> Self {
        Self::new(HandlerKind::PassThrough)
    }

    pub fn is_block(&self) -> bool {
        self.traits.block
    }

    /// Compute the events for opening a tag.
    ///
    /// `parent` is the kind of the innermost open tag, used by handlers whose
    /// meaning depends on where they appear.
    pub fn enter(&self, tag: &TagContext, parent: Option<HandlerKind>) -> Entry {
        let entry = build_entry(self.kind, tag, parent);
        if self.traits.paired {
            entry
        } else {
            Entry {
                begin: entry.begin.filter(|event| !event.is_begin()),
                end: None,
            }
        }
    }
}

fn default_traits(kind: HandlerKind) -> HandlerTraits {
    use HandlerKind::*;
    match kind {
        Header | Paragraph | List { .. } | DefinitionList | Quotation | Section | Table
        | Group => {
            HandlerTraits::new(true, true, true)
        }
        ListItem | DefinitionTerm | DefinitionDescription | TableRow | TableCell
        | TableHeadCell => HandlerTraits::new(false, true, true),
        HorizontalRule => HandlerTraits::new(true, true, false),
        Format(_) | Link => HandlerTraits::new(false, false, true),
        Image | LineBreak | PassThrough => HandlerTraits::new(false, false, false),
    }
}

/// Name and parameters of one open tag instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TagContext {
    pub name: String,
    pub parameters: Parameters,
}

impl TagContext {
    pub fn new(name: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// Events produced when a tag opens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    /// Emitted immediately.
    pub begin: Option<Event>,
    /// Parked on the frame and emitted when the tag closes.
    pub end: Option<Event>,
}

impl Entry {
    fn pair(begin: Event, end: Event) -> Self {
        Self {
            begin: Some(begin),
            end: Some(end),
        }
    }

    fn singleton(event: Event) -> Self {
        Self {
            begin: Some(event),
            end: None,
        }
    }
}

/// Derive a header level from tags like `h3`: one letter, then one digit 1-9.
pub fn header_level_from_tag(name: &str) -> Option<HeaderLevel> {
    let mut chars = name.chars();
    let prefix = chars.next()?;
    let digit = chars.next()?;
    if chars.next().is_some() || !prefix.is_ascii_alphabetic() {
        return None;
    }
    let level = digit.to_digit(10)?;
    HeaderLevel::new(level as usize)
}

fn build_entry(kind: HandlerKind, tag: &TagContext, parent: Option<HandlerKind>) -> Entry {
    let parameters = tag.parameters.clone();
    match kind {
        HandlerKind::Header => {
            let level = header_level_from_tag(&tag.name)
                .or_else(|| {
                    tag.parameters
                        .get("level")
                        .and_then(|raw| raw.parse().ok())
                        .and_then(HeaderLevel::new)
                })
                .unwrap_or_else(|| {
                    tracing::debug!(tag = %tag.name, "no header level in tag name, using 1");
                    HeaderLevel::TOP
                });
            let id = tag.parameters.get("id").unwrap_or_default().to_string();
            Entry::pair(
                Event::BeginHeader {
                    level,
                    id: id.clone(),
                    parameters: parameters.clone(),
                },
                Event::EndHeader {
                    level,
                    id,
                    parameters,
                },
            )
        }
        HandlerKind::Paragraph if parent == Some(HandlerKind::Quotation) => {
            Entry::pair(Event::BeginQuotationLine, Event::EndQuotationLine)
        }
        HandlerKind::Paragraph => Entry::pair(
            Event::BeginParagraph {
                parameters: parameters.clone(),
            },
            Event::EndParagraph { parameters },
        ),
        HandlerKind::List { ordered } => {
            let list_type = if ordered {
                ListType::from_ordered_type(tag.parameters.get("type"))
            } else {
                ListType::Bulleted
            };
            Entry::pair(
                Event::BeginList {
                    list_type,
                    parameters: parameters.clone(),
                },
                Event::EndList {
                    list_type,
                    parameters,
                },
            )
        }
        HandlerKind::ListItem => Entry::pair(
            Event::BeginListItem {
                parameters: parameters.clone(),
            },
            Event::EndListItem { parameters },
        ),
        HandlerKind::DefinitionList => Entry::pair(
            Event::BeginDefinitionList {
                parameters: parameters.clone(),
            },
            Event::EndDefinitionList { parameters },
        ),
        HandlerKind::DefinitionTerm => {
            Entry::pair(Event::BeginDefinitionTerm, Event::EndDefinitionTerm)
        }
        HandlerKind::DefinitionDescription => Entry::pair(
            Event::BeginDefinitionDescription,
            Event::EndDefinitionDescription,
        ),
        HandlerKind::Quotation => Entry::pair(
            Event::BeginQuotation {
                parameters: parameters.clone(),
            },
            Event::EndQuotation { parameters },
        ),
        HandlerKind::Table => Entry::pair(
            Event::BeginTable {
                parameters: parameters.clone(),
            },
            Event::EndTable { parameters },
        ),
        HandlerKind::TableRow => Entry::pair(
            Event::BeginTableRow {
                parameters: parameters.clone(),
            },
            Event::EndTableRow { parameters },
        ),
        HandlerKind::TableCell => Entry::pair(
            Event::BeginTableCell {
                parameters: parameters.clone(),
            },
            Event::EndTableCell { parameters },
        ),
        HandlerKind::TableHeadCell => Entry::pair(
            Event::BeginTableHeadCell {
                parameters: parameters.clone(),
            },
            Event::EndTableHeadCell { parameters },
        ),
        HandlerKind::Section => Entry::pair(
            Event::BeginSection {
                parameters: parameters.clone(),
            },
            Event::EndSection { parameters },
        ),
        HandlerKind::Group => Entry::pair(
            Event::BeginGroup {
                parameters: parameters.clone(),
            },
            Event::EndGroup { parameters },
        ),
        HandlerKind::Format(format) => Entry::pair(
            Event::BeginFormat {
                format,
                parameters: parameters.clone(),
            },
            Event::EndFormat { format, parameters },
        ),
        HandlerKind::Link => link_entry(parameters),
        HandlerKind::Image => {
            let mut parameters = parameters;
            let src = parameters.remove("src").unwrap_or_default();
            Entry::singleton(Event::OnImage {
                reference: ResourceReference::classify(&src),
                freestanding: false,
                parameters,
            })
        }
        HandlerKind::LineBreak => Entry::singleton(Event::OnNewLine),
        HandlerKind::HorizontalRule => Entry::singleton(Event::OnHorizontalLine { parameters }),
        HandlerKind::PassThrough => Entry::default(),
    }
}

// `<a href>` is a link; `<a name>` / `<a id>` without href is an anchor.
fn link_entry(mut parameters: Parameters) -> Entry {
    match parameters.remove("href") {
        Some(href) => {
            let reference = ResourceReference::classify(&href);
            Entry::pair(
                Event::BeginLink {
                    reference: reference.clone(),
                    freestanding: false,
                    parameters: parameters.clone(),
                },
                Event::EndLink {
                    reference,
                    freestanding: false,
                    parameters,
                },
            )
        }
        None => match parameters.get("name").or_else(|| parameters.get("id")) {
            Some(name) => Entry::singleton(Event::OnId {
                name: name.to_string(),
            }),
            None => Entry::default(),
        },
    }
}
