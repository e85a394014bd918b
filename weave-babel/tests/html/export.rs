use super::KITCHENSINK;
use weave_babel::format::Format;
use weave_babel::formats::html::HtmlFormat;
use weave_babel::listener::{Event, HeaderLevel, Parameters};
use weave_babel::options::RenderOptions;

fn render(options: &RenderOptions) -> String {
    let events = HtmlFormat
        .parse(KITCHENSINK)
        .expect("Failed to parse kitchensink.html");
    HtmlFormat
        .serialize_with_options(&events, options)
        .expect("Failed to serialize html")
}

#[test]
fn test_kitchensink_html_export() {
    let html = render(&RenderOptions::default());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Kitchen Sink</title>"));
    assert!(html.contains(r#"<section class="weave-section weave-section-1"><h1>"#));
    assert!(html.contains(r#"<ol type="I">"#));
    assert!(html.contains("<strong>bold</strong>"));
    assert!(html.contains("<em>italic</em>"));
    assert!(html.contains("<code>code</code>"));
    assert!(html.contains("<dt>Term</dt>"));
    assert!(html.contains("<pre><code>fn main() {}"));
    assert!(html.contains("<th>Name</th>"));
    assert!(html.contains(r#"<a href="https://example.org">the site</a>"#));
    assert!(html.contains(r#"<img src="logo.png" alt="Logo">"#));
    assert!(html.contains("<hr>"));
    assert!(html.contains("<p>Quoted line</p><p>Second quoted line</p>"));
    assert!(html.contains(r#"<h1><a id="top"></a>Kitchen Sink</h1>"#));
}

#[test]
fn test_deep_headers_are_clamped() {
    let html = render(&RenderOptions::default());
    assert!(html.contains("<h5>Deep heading</h5>"));

    // HTML stops at h6 whatever the configured ceiling.
    let html = render(&RenderOptions {
        max_section_level: 9,
        ..RenderOptions::default()
    });
    assert!(html.contains("<h6>Deep heading</h6>"));
}

#[test]
fn test_dropped_formats_keep_their_text() {
    let html = render(&RenderOptions::default());

    assert!(html.contains("struck"));
    assert!(!html.contains("<s>"));
    assert!(html.contains("tag"));
    assert!(!html.contains("blink"));
}

#[test]
fn test_title_option_is_a_fallback() {
    let level = HeaderLevel::new(1).unwrap();
    let events = vec![
        Event::BeginDocument {
            metadata: Parameters::new(),
        },
        Event::begin_header(level, ""),
        Event::word("Hello"),
        Event::end_header(level, ""),
        Event::EndDocument {
            metadata: Parameters::new(),
        },
    ];
    let options = RenderOptions {
        title: Some("From options".to_string()),
        ..RenderOptions::default()
    };

    let html = HtmlFormat.serialize_with_options(&events, &options).unwrap();
    assert!(html.contains("<title>From options</title>"));
}
