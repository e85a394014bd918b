use super::KITCHENSINK;
use weave_babel::format::Format;
use weave_babel::formats::html::HtmlFormat;
use weave_babel::listener::{Event, HeaderLevel, ListType, ResourceType};
use weave_babel::options::ParseOptions;
use weave_babel::parser::{ParseError, UnknownTagPolicy};
use weave_babel::FormatError;

fn kitchensink_events() -> Vec<Event> {
    HtmlFormat
        .parse(KITCHENSINK)
        .expect("Failed to parse kitchensink.html")
}

#[test]
fn test_head_becomes_document_metadata() {
    let events = kitchensink_events();

    let Some(Event::BeginDocument { metadata }) = events.first() else {
        panic!("stream must open with begin_document");
    };
    assert_eq!(metadata.get("title"), Some("Kitchen Sink"));
    assert_eq!(metadata.get("author"), Some("Weave"));
    assert!(matches!(events.last(), Some(Event::EndDocument { .. })));
}

#[test]
fn test_sections_and_headers() {
    let events = kitchensink_events();

    assert!(matches!(events[1], Event::BeginSection { .. }));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::BeginHeader { level, id, .. } if level.get() == 1 && id == "top"
    )));
    assert!(events.contains(&Event::begin_header(HeaderLevel::new(7).unwrap(), "")));
}

#[test]
fn test_lists_keep_their_numbering() {
    let list_types: Vec<ListType> = kitchensink_events()
        .iter()
        .filter_map(|event| match event {
            Event::BeginList { list_type, .. } => Some(*list_type),
            _ => None,
        })
        .collect();
    assert_eq!(list_types, vec![ListType::Bulleted, ListType::UpperRoman]);
}

#[test]
fn test_blockquote_paragraphs_become_quotation_lines() {
    let events = kitchensink_events();

    let start = events
        .iter()
        .position(|event| matches!(event, Event::BeginQuotation { .. }))
        .expect("quotation");
    assert_eq!(events[start + 1], Event::BeginQuotationLine);
    assert!(!events[start..]
        .iter()
        .take_while(|event| !matches!(event, Event::EndQuotation { .. }))
        .any(|event| matches!(event, Event::BeginParagraph { .. })));
}

#[test]
fn test_pre_is_block_verbatim_and_code_is_inline() {
    let events = kitchensink_events();

    assert!(events.contains(&Event::OnVerbatim {
        content: "fn main() {}\n".to_string(),
        inline: false,
        parameters: Default::default(),
    }));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::OnVerbatim { content, inline: true, .. } if content == "code"
    )));
}

#[test]
fn test_links_and_images() {
    let events = kitchensink_events();

    let link = events
        .iter()
        .find_map(|event| match event {
            Event::BeginLink { reference, .. } => Some(reference),
            _ => None,
        })
        .expect("link");
    assert_eq!(link.reference, "https://example.org");
    assert_eq!(link.kind, ResourceType::Url);

    assert!(events.iter().any(|event| matches!(
        event,
        Event::OnImage { reference, parameters, .. }
            if reference.reference == "logo.png" && parameters.get("alt") == Some("Logo")
    )));
}

#[test]
fn test_unknown_tags_pass_through_by_default() {
    let words: Vec<String> = kitchensink_events()
        .into_iter()
        .filter_map(|event| match event {
            Event::OnWord { word } => Some(word),
            _ => None,
        })
        .collect();
    assert!(words.contains(&"tag".to_string()));
}

#[test]
fn test_unknown_tags_fail_when_asked() {
    let options = ParseOptions {
        unknown_tags: UnknownTagPolicy::Fail,
    };
    let err = HtmlFormat
        .parse_with_options(KITCHENSINK, &options)
        .unwrap_err();

    match err {
        FormatError::Parse(ParseError::UnknownTag { name, stack }) => {
            assert_eq!(name, "blink");
            assert_eq!(stack.last().map(String::as_str), Some("p"));
        }
        other => panic!("expected an unknown tag error, got {other:?}"),
    }
}

#[test]
fn test_malformed_html_is_repaired_before_parsing() {
    let events = HtmlFormat.parse("<p><b>bold</p><p>next").unwrap();

    let begins = events.iter().filter(|event| event.is_begin()).count();
    let ends = events.iter().filter(|event| event.is_end()).count();
    assert_eq!(begins, ends);
}
