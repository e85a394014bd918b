use weave_babel::format::Format;
use weave_babel::formats::html::HtmlFormat;
use weave_babel::formats::markdown::MarkdownFormat;
use weave_babel::options::RenderOptions;
use weave_babel::FormatRegistry;

const KITCHENSINK: &str = include_str!("../html/fixtures/kitchensink.html");

fn kitchensink_markdown() -> String {
    let events = HtmlFormat
        .parse(KITCHENSINK)
        .expect("Failed to parse kitchensink.html");
    MarkdownFormat
        .serialize(&events)
        .expect("Failed to serialize markdown")
}

#[test]
fn test_kitchensink_markdown_export() {
    let md = kitchensink_markdown();

    assert!(md.starts_with("---\ntitle: \"Kitchen Sink\"\n---"), "got:\n{md}");
    assert!(md.contains("# Kitchen Sink"));
    assert!(md.contains("**bold**"));
    assert!(md.contains("*italic*"));
    assert!(md.contains("`code`"));
    assert!(md.contains("- first"));
    assert!(md.contains("- second"));
    assert!(md.contains("**Term**:"));
    assert!(md.contains("Meaning"));
    assert!(md.contains("Quoted line\n\nSecond quoted line"));
    assert!(md.contains("```\nfn main() {}\n```"));
    assert!(md.contains("[the site](https://example.org)"));
    assert!(md.contains("![Logo](logo.png)"));
}

#[test]
fn test_clamped_and_narrowed_constructs() {
    let md = kitchensink_markdown();

    assert!(md.contains("##### Deep heading"), "got:\n{md}");
    assert!(!md.contains("###### Deep heading"));
    // Roman numbering has no Markdown form.
    assert!(md.contains("1. one"));
}

#[test]
fn test_unsupported_formats_keep_their_text() {
    let md = kitchensink_markdown();

    assert!(md.contains("struck"));
    assert!(!md.contains("~~"));
}

#[test]
fn test_table_export() {
    let md = kitchensink_markdown();

    assert!(md.contains("| Name | Value |"), "got:\n{md}");
    assert!(md.contains("| a | 1 |"));
}

#[test]
fn test_indented_code_when_fences_are_off() {
    let registry = FormatRegistry::with_defaults();
    let events = registry.parse("<pre>let x = 1;</pre>", "html").unwrap();

    let options = RenderOptions {
        fenced_code: false,
        ..RenderOptions::default()
    };
    let md = registry
        .serialize_with_options(&events, "markdown", &options)
        .unwrap();
    assert!(!md.contains("```"), "got:\n{md}");
    assert!(md.contains("let x = 1;"));
}
