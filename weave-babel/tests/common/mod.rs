//! Tests for the format-agnostic layers: event tree and projection.

use weave_babel::format::Format;
use weave_babel::formats::html::HtmlFormat;
use weave_babel::listener::{replay, Event, EventKind, Format as TextFormat, ListType};
use weave_babel::projection::{
    Degradation, Numbering, ProjectionLoss, RecordingSink, SinkListener,
};
use weave_babel::tree::{tree_to_events, DocNode, TreeBuilder};

const KITCHENSINK: &str = include_str!("../html/fixtures/kitchensink.html");

fn kitchensink_events() -> Vec<Event> {
    HtmlFormat
        .parse(KITCHENSINK)
        .expect("Failed to parse kitchensink.html")
}

#[test]
fn test_round_trip_conversion() {
    let events = kitchensink_events();

    // 1. Convert events to tree (flat -> nested)
    let mut builder = TreeBuilder::new();
    replay(&events, &mut builder);
    let tree = builder.finish().expect("Failed to build tree");

    // 2. Convert tree back to events (nested -> flat)
    let reconstructed = tree_to_events(&tree);

    // 3. Assert that the original and reconstructed streams are identical
    assert_eq!(events, reconstructed);
}

#[test]
fn test_tree_has_single_document_root() {
    let mut builder = TreeBuilder::new();
    replay(&kitchensink_events(), &mut builder);
    let tree = builder.finish().unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].kind(), EventKind::Document);
    let DocNode::Container(document) = &tree[0] else {
        panic!("document must be a container");
    };
    assert_eq!(document.children[0].kind(), EventKind::Section);
}

#[test]
fn test_projection_records_losses() {
    let mut listener = SinkListener::new(RecordingSink::new());
    replay(&kitchensink_events(), &mut listener);

    let losses = listener.losses();
    assert!(losses.contains(&ProjectionLoss::new(
        EventKind::Header,
        Degradation::Clamped { from: 7, to: 5 }
    )));
    assert!(losses.contains(&ProjectionLoss::new(
        EventKind::List,
        Degradation::Narrowed {
            from: ListType::UpperRoman,
            to: Numbering::Decimal
        }
    )));
    assert!(losses.contains(&ProjectionLoss::new(
        EventKind::Format,
        Degradation::FormatDropped(TextFormat::Strikeout)
    )));
    assert!(losses.contains(&ProjectionLoss::new(
        EventKind::Quotation,
        Degradation::Elided
    )));
}

/// Sink calls that open or close nothing.
const LEAF_CALLS: &[&str] = &[
    "head",
    "text",
    "raw_text",
    "verbatim",
    "figure",
    "anchor",
    "horizontal_rule",
];

/// Pairing key of a recorded call and whether it closes. Sections keep
/// their level so that `section(2)` only matches `section_(2)`.
fn call_key(call: &str) -> Option<(String, bool)> {
    let (name, args) = match call.find('(') {
        Some(open) => (&call[..open], &call[open..]),
        None => (call, ""),
    };
    if LEAF_CALLS.contains(&name) {
        return None;
    }
    let (base, closes) = match name.strip_suffix('_') {
        Some(base) => (base, true),
        None => (name, false),
    };
    let key = if base.starts_with("section") {
        format!("{base}{args}")
    } else {
        base.to_string()
    };
    Some((key, closes))
}

fn assert_properly_nested(calls: &[String]) {
    let mut stack: Vec<String> = Vec::new();
    for (index, call) in calls.iter().enumerate() {
        let Some((key, closes)) = call_key(call) else {
            continue;
        };
        if closes {
            assert_eq!(
                stack.pop().as_deref(),
                Some(key.as_str()),
                "call #{index} {call} closes out of order in {calls:#?}"
            );
        } else {
            stack.push(key);
        }
    }
    assert!(stack.is_empty(), "unclosed sink calls: {stack:?}");
}

fn project_html(source: &str, sink: RecordingSink) -> Vec<String> {
    let events = HtmlFormat.parse(source).expect("Failed to parse html");
    let mut listener = SinkListener::new(sink);
    replay(&events, &mut listener);
    listener.into_sink().calls().to_vec()
}

#[test]
fn test_projection_calls_are_properly_nested() {
    let calls = project_html(
        KITCHENSINK,
        RecordingSink::new().with_max_section_level(2).with_anchors(),
    );
    assert_properly_nested(&calls);
    assert!(calls.contains(&"section(2)".to_string()));
    assert!(!calls.iter().any(|call| call == "section(3)"));

    for source in [
        "<section><ul><li><h2>T</h2></li></ul><p>after</p></section>",
        "<section><table><tr><td><h3>Cell</h3></td></tr></table><h2>Late</h2></section>",
        "<section><h1>A</h1><section><p>x</p><h2>B</h2></section><p>y</p></section>",
        "<blockquote><p>first line</p><p>second line</p></blockquote>",
    ] {
        assert_properly_nested(&project_html(source, RecordingSink::new()));
    }
}

#[test]
fn test_nested_header_does_not_capture_later_blocks() {
    let html = HtmlFormat
        .serialize(
            &HtmlFormat
                .parse("<section><ul><li><h2>T</h2></li></ul><p>after</p></section>")
                .unwrap(),
        )
        .unwrap();
    assert!(html.contains("</ul><p>after</p>"), "got {html}");
}

#[test]
fn test_quotation_lines_do_not_run_together() {
    let calls = project_html(
        "<blockquote><p>first line</p><p>second line</p></blockquote>",
        RecordingSink::new(),
    );
    let text: Vec<_> = calls
        .iter()
        .filter(|call| call.starts_with("paragraph") || call.starts_with("text"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        text,
        [
            "paragraph",
            "text(\"first\")",
            "text(\" \")",
            "text(\"line\")",
            "paragraph_",
            "paragraph",
            "text(\"second\")",
            "text(\" \")",
            "text(\"line\")",
            "paragraph_",
        ]
    );
}
