//! Treeviz formatter for event trees
//!
//! Treeviz is a visual representation of the document tree: the event stream
//! is folded into [`DocNode`]s by [`TreeBuilder`] and printed one node per
//! line with box-drawing connectors.
//!
//! So the format is :
//! <prefix><connector> <icon><space><label> (truncated to 30 characters)
//!
//! Example:
//!
//!   ⧉ Document (Guide, 2 items)
//!   ├─ ⊤ h1 Guide
//!   └─ ☰ 2 items
//!     ├─ • first
//!     └─ • second
//!
//! Words, spaces and symbols are not printed as nodes of their own; they make
//! up the label of the container holding them.

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::listener::{replay, Event, EventKind};
use crate::options::RenderOptions;
use crate::tree::{DocNode, TreeBuilder};

const MAX_LABEL_CHARS: usize = 30;

pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree of the document structure"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize_with_options(
        &self,
        events: &[Event],
        _options: &RenderOptions,
    ) -> Result<String, FormatError> {
        to_treeviz_str(events)
    }
}

/// Build the tree for `events` and render it.
pub fn to_treeviz_str(events: &[Event]) -> Result<String, FormatError> {
    let mut builder = TreeBuilder::new();
    replay(events, &mut builder);
    let nodes = builder.finish()?;

    let [DocNode::Container(document)] = nodes.as_slice() else {
        return Ok(format_children(&visible_children(&nodes), ""));
    };
    let Event::BeginDocument { metadata } = &document.begin else {
        return Ok(format_children(&visible_children(&nodes), ""));
    };

    let shown = visible_children(&document.children);
    let icon = get_icon(EventKind::Document);
    let mut output = match metadata.get("title") {
        Some(title) => format!("{icon} Document ({title}, {} items)\n", shown.len()),
        None => format!("{icon} Document ({} items)\n", shown.len()),
    };
    output.push_str(&format_children(&shown, ""));
    Ok(output)
}

fn format_node(node: &DocNode, prefix: &str, is_last: bool) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{prefix}{connector} {} {}\n",
        get_icon(node.kind()),
        truncate(&label(node))
    );
    let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
    output.push_str(&format_children(
        &visible_children(node.children()),
        &child_prefix,
    ));
    output
}

fn format_children(children: &[&DocNode], prefix: &str) -> String {
    let mut output = String::new();
    for (i, child) in children.iter().enumerate() {
        output.push_str(&format_node(child, prefix, i == children.len() - 1));
    }
    output
}

fn visible_children(nodes: &[DocNode]) -> Vec<&DocNode> {
    nodes
        .iter()
        .filter(|node| {
            !matches!(
                node.kind(),
                EventKind::Word | EventKind::Space | EventKind::NewLine | EventKind::SpecialSymbol
            )
        })
        .collect()
}

fn label(node: &DocNode) -> String {
    match node {
        DocNode::Container(container) => match &container.begin {
            Event::BeginHeader { level, .. } => format!("h{level} {}", node.text()),
            Event::BeginList { .. } => format!("{} items", node.children().len()),
            Event::BeginTable { .. } => format!("{} rows", node.children().len()),
            Event::BeginFormat { format, .. } => format!("{format}: {}", node.text()),
            Event::BeginLink { reference, .. } => reference.reference.clone(),
            Event::BeginMacroMarker { name, .. } => name.clone(),
            _ => node.text(),
        },
        DocNode::Leaf(event) => match event {
            Event::OnVerbatim { content, .. } => content.clone(),
            Event::OnImage { reference, .. } => reference.reference.clone(),
            Event::OnRawText { syntax, .. } => syntax.clone(),
            Event::OnMacro { name, .. } => name.clone(),
            Event::OnId { name } => name.clone(),
            Event::OnEmptyLines { count } => format!("{count} empty lines"),
            other => other.name().to_string(),
        },
    }
}

fn truncate(label: &str) -> String {
    let flat = label.replace('\n', " ");
    if flat.chars().count() > MAX_LABEL_CHARS {
        let cut: String = flat.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{HeaderLevel, ListType, Parameters};

    fn item(text: &str) -> Vec<Event> {
        vec![
            Event::BeginListItem {
                parameters: Parameters::new(),
            },
            Event::word(text),
            Event::EndListItem {
                parameters: Parameters::new(),
            },
        ]
    }

    #[test]
    fn test_document_tree() {
        let level = HeaderLevel::new(1).unwrap();
        let mut events = vec![
            Event::BeginDocument {
                metadata: [("title", "Guide")].into_iter().collect(),
            },
            Event::begin_header(level, ""),
            Event::word("Guide"),
            Event::end_header(level, ""),
            Event::BeginList {
                list_type: ListType::Bulleted,
                parameters: Parameters::new(),
            },
        ];
        events.extend(item("first"));
        events.extend(item("second"));
        events.push(Event::EndList {
            list_type: ListType::Bulleted,
            parameters: Parameters::new(),
        });
        events.push(Event::EndDocument {
            metadata: Parameters::new(),
        });

        let output = to_treeviz_str(&events).unwrap();
        let expected = "\
⧉ Document (Guide, 2 items)
├─ ⊤ h1 Guide
└─ ☰ 2 items
  ├─ • first
  └─ • second
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let long = "x".repeat(40);
        let events = vec![
            Event::BeginParagraph {
                parameters: Parameters::new(),
            },
            Event::word(long),
            Event::EndParagraph {
                parameters: Parameters::new(),
            },
        ];
        let output = to_treeviz_str(&events).unwrap();
        assert_eq!(output, format!("└─ ¶ {}…\n", "x".repeat(29)));
    }

    #[test]
    fn test_unbalanced_stream_is_an_error() {
        let events = vec![Event::BeginParagraph {
            parameters: Parameters::new(),
        }];
        assert!(matches!(
            to_treeviz_str(&events),
            Err(FormatError::Tree(_))
        ));
    }
}
