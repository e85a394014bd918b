use crate::error::FormatError;
use crate::formats::common::events_from_markup;
use crate::formats::common::markup::MarkupNode;
use crate::listener::Event;
use crate::options::ParseOptions;
use roxmltree::{Node, NodeType, ParsingOptions};

pub fn parse_from_xhtml(source: &str, options: &ParseOptions) -> Result<Vec<Event>, FormatError> {
    let xml_options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(source, xml_options)
        .map_err(|e| FormatError::Markup(format!("XML parsing error: {e}")))?;

    let root = convert_node(doc.root_element());
    events_from_markup(&root.into_iter().collect::<Vec<_>>(), options)
}

fn convert_node(node: Node) -> Option<MarkupNode> {
    match node.node_type() {
        NodeType::Element => Some(MarkupNode::Element {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|attr| (attr.name(), attr.value()))
                .collect(),
            children: node.children().filter_map(convert_node).collect(),
        }),
        NodeType::Text => node.text().map(MarkupNode::text),
        NodeType::Root | NodeType::Comment | NodeType::PI => None,
    }
}
