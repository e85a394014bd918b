use weave_babel::format::Format;
use weave_babel::formats::html::HtmlFormat;
use weave_babel::formats::xhtml::XhtmlFormat;
use weave_babel::listener::{Event, HeaderLevel};
use weave_babel::options::ParseOptions;
use weave_babel::parser::{ParseError, UnknownTagPolicy};
use weave_babel::FormatError;

const KITCHENSINK: &str = include_str!("fixtures/kitchensink.xhtml");

#[test]
fn test_kitchensink_xhtml_import() {
    let events = XhtmlFormat
        .parse(KITCHENSINK)
        .expect("Failed to parse kitchensink.xhtml");

    let Some(Event::BeginDocument { metadata }) = events.first() else {
        panic!("stream must open with begin_document");
    };
    assert_eq!(metadata.get("title"), Some("Kitchen Sink"));
    assert_eq!(metadata.get("author"), Some("Weave"));

    assert!(events.contains(&Event::begin_header(HeaderLevel::new(7).unwrap(), "")));
    assert!(events.contains(&Event::OnVerbatim {
        content: "fn main() {}\n".to_string(),
        inline: false,
        parameters: Default::default(),
    }));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BeginTableHeadCell { .. })));
}

#[test]
fn test_xhtml_and_html_agree_on_well_formed_input() {
    let xhtml = r#"<html xmlns="http://www.w3.org/1999/xhtml"><head><title>T</title></head><body><h2>A</h2><p>b <em>c</em></p><ul><li>d</li></ul></body></html>"#;
    let html = "<html><head><title>T</title></head><body><h2>A</h2><p>b <em>c</em></p><ul><li>d</li></ul></body></html>";

    assert_eq!(
        XhtmlFormat.parse(xhtml).unwrap(),
        HtmlFormat.parse(html).unwrap()
    );
}

#[test]
fn test_malformed_xml_is_a_markup_error() {
    let err = XhtmlFormat
        .parse("<html><body><p><b>open</p></body></html>")
        .unwrap_err();
    assert!(matches!(err, FormatError::Markup(_)), "got {err:?}");
}

#[test]
fn test_unknown_tag_policy_applies() {
    let source = "<body><p>a <marquee>b</marquee></p></body>";

    let events = XhtmlFormat.parse(source).unwrap();
    assert!(events.contains(&Event::word("b")));

    let options = ParseOptions {
        unknown_tags: UnknownTagPolicy::Fail,
    };
    let err = XhtmlFormat.parse_with_options(source, &options).unwrap_err();
    assert!(matches!(
        err,
        FormatError::Parse(ParseError::UnknownTag { ref name, .. }) if name == "marquee"
    ));
}
