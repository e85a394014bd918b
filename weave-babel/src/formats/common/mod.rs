//! Code shared by the markup front-ends.

pub mod markup;

use crate::error::FormatError;
use crate::listener::{Event, EventRecorder};
use crate::options::ParseOptions;
use crate::parser::{parse_document, HandlerRegistry};
use markup::MarkupNode;

/// Tokenize a markup tree and run it through the structural parser.
pub fn events_from_markup(
    nodes: &[MarkupNode],
    options: &ParseOptions,
) -> Result<Vec<Event>, FormatError> {
    let registry = HandlerRegistry::with_defaults().with_unknown_tag_policy(options.unknown_tags);
    let document = markup::tokenize(nodes, &registry);
    let recorder = parse_document(
        document.tokens,
        document.metadata,
        &registry,
        EventRecorder::new(),
    )?;
    Ok(recorder.into_events())
}
