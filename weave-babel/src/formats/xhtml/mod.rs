//! XHTML format implementation
//!
//! Parsing only. XHTML is read with `roxmltree`, a strict XML parser: unlike
//! the html format, malformed input is rejected up front instead of repaired.
//! Element names are matched by local name, so documents in the XHTML
//! namespace and bare XML fragments both work.

mod parser;

pub use parser::parse_from_xhtml;

use crate::error::FormatError;
use crate::format::Format;
use crate::listener::Event;
use crate::options::ParseOptions;

pub struct XhtmlFormat;

impl Format for XhtmlFormat {
    fn name(&self) -> &str {
        "xhtml"
    }

    fn description(&self) -> &str {
        "XHTML (well-formed XML) documents"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xhtml", "xml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &ParseOptions,
    ) -> Result<Vec<Event>, FormatError> {
        parse_from_xhtml(source, options)
    }
}
