//! Nested form of an event stream.

use crate::listener::{Event, EventKind};

/// A node of the document tree.
///
/// Containers keep both their begin and end events, so walking a tree gives
/// back exactly the stream it was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Container(Container),
    Leaf(Event),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub begin: Event,
    pub end: Event,
    pub children: Vec<DocNode>,
}

impl DocNode {
    pub fn kind(&self) -> EventKind {
        match self {
            DocNode::Container(container) => container.begin.kind(),
            DocNode::Leaf(event) => event.kind(),
        }
    }

    pub fn children(&self) -> &[DocNode] {
        match self {
            DocNode::Container(container) => &container.children,
            DocNode::Leaf(_) => &[],
        }
    }

    /// Concatenated text of all words, spaces and symbols below this node.
    pub fn text(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }
}

fn collect_text(node: &DocNode, text: &mut String) {
    match node {
        DocNode::Leaf(Event::OnWord { word }) => text.push_str(word),
        DocNode::Leaf(Event::OnSpace) | DocNode::Leaf(Event::OnNewLine) => text.push(' '),
        DocNode::Leaf(Event::OnSpecialSymbol { symbol }) => text.push(*symbol),
        DocNode::Leaf(Event::OnVerbatim { content, .. }) => text.push_str(content),
        DocNode::Leaf(_) => {}
        DocNode::Container(container) => {
            for child in &container.children {
                collect_text(child, text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::Parameters;

    #[test]
    fn text_concatenates_leaves() {
        let node = DocNode::Container(Container {
            begin: Event::BeginParagraph {
                parameters: Parameters::new(),
            },
            end: Event::EndParagraph {
                parameters: Parameters::new(),
            },
            children: vec![
                DocNode::Leaf(Event::word("Hello")),
                DocNode::Leaf(Event::OnSpecialSymbol { symbol: ',' }),
                DocNode::Leaf(Event::OnSpace),
                DocNode::Leaf(Event::word("world")),
            ],
        });
        assert_eq!(node.text(), "Hello, world");
        assert_eq!(node.kind(), EventKind::Paragraph);
        assert_eq!(node.children().len(), 4);
    }
}
