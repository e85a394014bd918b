//! HTML parsing
//!
//! html5ever builds a browser-grade DOM from any input, however malformed,
//! so the structural parser always sees well-nested tags here.

use crate::error::FormatError;
use crate::formats::common::events_from_markup;
use crate::formats::common::markup::MarkupNode;
use crate::listener::Event;
use crate::options::ParseOptions;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

pub fn parse_from_html(source: &str, options: &ParseOptions) -> Result<Vec<Event>, FormatError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(source);
    let nodes = convert_children(&dom.document);
    events_from_markup(&nodes, options)
}

fn convert_children(handle: &Handle) -> Vec<MarkupNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<MarkupNode> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => Some(MarkupNode::Element {
            name: name.local.to_string(),
            attributes: attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect(),
            children: convert_children(handle),
        }),
        NodeData::Text { contents } => Some(MarkupNode::Text(contents.borrow().to_string())),
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}
