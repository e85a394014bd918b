//! Markdown format implementation
//!
//! Serialization only: events are projected onto a Comrak AST and formatted
//! as CommonMark with the table and strikethrough extensions enabled.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown serialization. It builds a real AST
//! and handles escaping, list markers and table layout for us.
//!
//! # Element Mapping Table
//!
//! | Event                 | Markdown Equivalent     | Notes                                  |
//! |-----------------------|-------------------------|----------------------------------------|
//! | Header                | Heading (# ## ###)      | Level clamped to 6                     |
//! | Section               | (none)                  | Only the heading it frames is written  |
//! | Paragraph             | Paragraph               | Direct mapping                         |
//! | List                  | List (- or 1.)          | Every ordered style becomes `1.`       |
//! | DefinitionList        | **Term**: Description   | Bold term + colon, then the paragraphs |
//! | Verbatim (block)      | Code block (```)        | Indented instead when fences are off   |
//! | Verbatim (inline)     | `code`                  | Direct                                 |
//! | Table                 | GFM table               | First row becomes the header row       |
//! | Link / Image          | `[text](url)` / `![alt](src)` | Direct                           |
//! | RawText (html)        | Inline HTML             | Other syntaxes are dropped             |
//! | Document title        | YAML front matter       | `title:` key, double-quoted            |
//!
//! # Lossy Conversions
//!
//! - Headings deeper than 6 collapse onto h6
//! - Roman and alphabetic numbering become decimal
//! - Underline, strikeout, superscript and subscript runs lose their styling
//! - Quotations and groups are flattened into their content; each quoted
//!   line becomes its own paragraph

pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::listener::Event;
use crate::options::RenderOptions;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize_with_options(
        &self,
        events: &[Event],
        options: &RenderOptions,
    ) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(events, options)
    }
}
