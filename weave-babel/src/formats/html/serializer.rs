//! HTML serialization
//!
//! Pipeline: events → [`SinkListener`] → [`HtmlSink`] (RcDom) → HTML string.
//!
//! The sink keeps a stack of open element handles. Open calls append a new
//! element to the current parent and push it; close calls pop. html5ever's
//! serializer takes care of escaping.

use crate::error::FormatError;
use crate::listener::{replay, Event};
use crate::options::RenderOptions;
use crate::projection::{Numbering, SectionSink, SinkListener};
use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope,
    Attribute, LocalName, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// HTML has six heading levels.
const HTML_MAX_HEADING: usize = 6;

/// Serialize an event stream to a complete HTML document
pub fn serialize_to_html(events: &[Event], options: &RenderOptions) -> Result<String, FormatError> {
    let mut listener = SinkListener::new(HtmlSink::new(options));
    replay(events, &mut listener);
    let sink = listener.into_sink();

    let title = sink
        .title
        .clone()
        .or_else(|| options.title.clone())
        .unwrap_or_else(|| "Untitled".to_string());
    let body_html = serialize_dom(&sink.dom)?;
    Ok(wrap_in_document(&body_html, &title))
}

/// [`SectionSink`] building an html5ever DOM.
pub struct HtmlSink {
    dom: RcDom,
    current_parent: Handle,
    parent_stack: Vec<Handle>,
    title: Option<String>,
    max_section_level: usize,
}

impl HtmlSink {
    pub fn new(options: &RenderOptions) -> Self {
        let dom = RcDom::default();
        let doc_container = create_element("div", vec![("class", "weave-document")]);
        dom.document
            .children
            .borrow_mut()
            .push(doc_container.clone());
        Self {
            dom,
            current_parent: doc_container,
            parent_stack: Vec::new(),
            title: None,
            max_section_level: options.max_section_level.min(HTML_MAX_HEADING),
        }
    }

    fn append(&self, node: Handle) {
        self.current_parent.children.borrow_mut().push(node);
    }

    fn open(&mut self, tag: &str, attrs: Vec<(&str, &str)>) {
        let element = create_element(tag, attrs);
        self.append(element.clone());
        let parent = std::mem::replace(&mut self.current_parent, element);
        self.parent_stack.push(parent);
    }

    fn close(&mut self, tag: &str) {
        match self.parent_stack.pop() {
            Some(parent) => self.current_parent = parent,
            None => tracing::warn!(tag, "html sink closed an element that was never opened"),
        }
    }

    fn leaf(&self, tag: &str, attrs: Vec<(&str, &str)>) {
        self.append(create_element(tag, attrs));
    }
}

impl SectionSink for HtmlSink {
    fn max_section_level(&self) -> usize {
        self.max_section_level
    }

    fn supports_numbering(&self, _numbering: Numbering) -> bool {
        true
    }

    fn supports_anchors(&self) -> bool {
        true
    }

    fn head(&mut self, title: Option<&str>) {
        self.title = title.map(str::to_string);
    }

    fn body(&mut self) {}

    fn body_(&mut self) {}

    fn section(&mut self, level: usize) {
        let class = format!("weave-section weave-section-{level}");
        self.open("section", vec![("class", &class)]);
    }

    fn section_(&mut self, _level: usize) {
        self.close("section");
    }

    fn section_title(&mut self, level: usize) {
        self.open(&format!("h{level}"), vec![]);
    }

    fn section_title_(&mut self, level: usize) {
        self.close(&format!("h{level}"));
    }

    fn paragraph(&mut self) {
        self.open("p", vec![]);
    }

    fn paragraph_(&mut self) {
        self.close("p");
    }

    fn list(&mut self) {
        self.open("ul", vec![]);
    }

    fn list_(&mut self) {
        self.close("ul");
    }

    fn numbered_list(&mut self, numbering: Numbering) {
        let kind = match numbering {
            Numbering::Decimal => None,
            Numbering::LowerAlpha => Some("a"),
            Numbering::UpperAlpha => Some("A"),
            Numbering::LowerRoman => Some("i"),
            Numbering::UpperRoman => Some("I"),
        };
        self.open("ol", kind.map(|kind| ("type", kind)).into_iter().collect());
    }

    fn numbered_list_(&mut self) {
        self.close("ol");
    }

    fn list_item(&mut self) {
        self.open("li", vec![]);
    }

    fn list_item_(&mut self) {
        self.close("li");
    }

    fn definition_list(&mut self) {
        self.open("dl", vec![]);
    }

    fn definition_list_(&mut self) {
        self.close("dl");
    }

    fn defined_term(&mut self) {
        self.open("dt", vec![]);
    }

    fn defined_term_(&mut self) {
        self.close("dt");
    }

    fn definition(&mut self) {
        self.open("dd", vec![]);
    }

    fn definition_(&mut self) {
        self.close("dd");
    }

    fn bold(&mut self) {
        self.open("strong", vec![]);
    }

    fn bold_(&mut self) {
        self.close("strong");
    }

    fn italic(&mut self) {
        self.open("em", vec![]);
    }

    fn italic_(&mut self) {
        self.close("em");
    }

    fn monospaced(&mut self) {
        self.open("code", vec![]);
    }

    fn monospaced_(&mut self) {
        self.close("code");
    }

    fn verbatim(&mut self, content: &str) {
        let pre = create_element("pre", vec![]);
        let code = create_element("code", vec![]);
        code.children.borrow_mut().push(create_text(content));
        pre.children.borrow_mut().push(code);
        self.append(pre);
    }

    fn text(&mut self, text: &str) {
        self.append(create_text(text));
    }

    fn raw_text(&mut self, text: &str, syntax: &str) {
        if !syntax.starts_with("html") && !syntax.starts_with("xhtml") {
            tracing::debug!(syntax, "dropping raw text the html sink cannot embed");
            return;
        }
        // Let html5ever parse the fragment and graft the resulting body.
        let fragment = parse_document(RcDom::default(), Default::default()).one(text);
        if let Some(body) = find_element(&fragment.document, "body") {
            for child in body.children.borrow().iter() {
                self.append(child.clone());
            }
        }
    }

    fn horizontal_rule(&mut self) {
        self.leaf("hr", vec![]);
    }

    fn table(&mut self) {
        self.open("table", vec![]);
    }

    fn table_(&mut self) {
        self.close("table");
    }

    fn table_row(&mut self) {
        self.open("tr", vec![]);
    }

    fn table_row_(&mut self) {
        self.close("tr");
    }

    fn table_cell(&mut self) {
        self.open("td", vec![]);
    }

    fn table_cell_(&mut self) {
        self.close("td");
    }

    fn table_header_cell(&mut self) {
        self.open("th", vec![]);
    }

    fn table_header_cell_(&mut self) {
        self.close("th");
    }

    fn link(&mut self, href: &str) {
        self.open("a", vec![("href", href)]);
    }

    fn link_(&mut self) {
        self.close("a");
    }

    fn figure(&mut self, src: &str, alt: Option<&str>) {
        let mut attrs = vec![("src", src)];
        if let Some(alt) = alt {
            attrs.push(("alt", alt));
        }
        self.leaf("img", attrs);
    }

    fn anchor(&mut self, name: &str) {
        self.leaf("a", vec![("id", name)]);
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the DOM to an HTML string (just the inner content)
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let doc_container = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::Serialization("Empty document".to_string()))?
        .clone();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in doc_container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone())
            .map_err(|e| FormatError::Serialization(format!("HTML serialization failed: {e}")))?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::Serialization(format!("UTF-8 conversion failed: {e}")))
}

fn wrap_in_document(body_html: &str, title: &str) -> String {
    let escaped_title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="generator" content="weave">
  <title>{escaped_title}</title>
</head>
<body>
<div class="weave-document">
{body_html}
</div>
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
