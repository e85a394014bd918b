//! HTML format implementation
//!
//! This module implements bidirectional conversion between HTML5 and the
//! event stream.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `rcdom` + `markup5ever` ecosystem for HTML parsing and serialization:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//! - `markup5ever`: Serialization infrastructure
//!
//! html5ever repairs malformed input the way a browser would, so the
//! structural parser only ever sees a well-formed tree from this format.
//!
//! # Element Mapping Table
//!
//! | Event            | HTML Equivalent                                         | Import Notes                        |
//! |------------------|---------------------------------------------------------|-------------------------------------|
//! | Document         | `<div class="weave-document">`                          | `<title>` and `<meta>` → metadata   |
//! | Section          | `<section class="weave-section weave-section-N">`       | `section`, `article`, `main`        |
//! | Header           | `<hN>`, id as a leading `<a id>`                        | Level clamped to 6 on export        |
//! | Paragraph        | `<p>`                                                   | Loose inline runs get a paragraph   |
//! | List             | `<ul>` / `<ol type>`                                    | `type` attribute picks the style    |
//! | DefinitionList   | `<dl>` `<dt>` `<dd>`                                    | Direct mapping                      |
//! | Quotation        | (flattened, one `<p>` per line)                         | `<blockquote>` lines                |
//! | Verbatim         | `<pre><code>` / `<code>`                                | Leading newline of `<pre>` dropped  |
//! | Table            | `<table>` `<tr>` `<td>` `<th>`                          | Row groups are transparent          |
//! | Link / Image     | `<a href>` / `<img src alt>`                            | Reference kind inferred from href   |
//! | Format           | `<strong>` `<em>` `<code>`                              | `b`, `i`, `u`, `s`, `sup`, `sub`... |
//!
//! # Lossy Conversions
//!
//! - Headings deeper than 6 collapse onto h6
//! - Underline, strikeout, superscript and subscript runs lose their styling on export
//! - Comments, scripts and styles are dropped on import

mod parser;
mod serializer;

pub use parser::parse_from_html;
pub use serializer::{serialize_to_html, HtmlSink};

use crate::error::FormatError;
use crate::format::Format;
use crate::listener::Event;
use crate::options::{ParseOptions, RenderOptions};

/// Format implementation for HTML
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 document format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &ParseOptions,
    ) -> Result<Vec<Event>, FormatError> {
        parse_from_html(source, options)
    }

    fn serialize_with_options(
        &self,
        events: &[Event],
        options: &RenderOptions,
    ) -> Result<String, FormatError> {
        serialize_to_html(events, options)
    }
}
