//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! A format turns source text into an event stream, an event stream into text, or both.

use crate::error::FormatError;
use crate::listener::Event;
use crate::options::{ParseOptions, RenderOptions};

/// Trait for document formats
///
/// Formats can support parsing, serialization, or both. Implementors override
/// the `*_with_options` methods; the plain variants use default options.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize_with_options(
///         &self,
///         events: &[Event],
///         options: &RenderOptions,
///     ) -> Result<String, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "html", "markdown", "events")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → events)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (events → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text with default options
    fn parse(&self, source: &str) -> Result<Vec<Event>, FormatError> {
        self.parse_with_options(source, &ParseOptions::default())
    }

    /// Parse source text into a balanced event stream
    ///
    /// Default implementation returns NotSupported error.
    fn parse_with_options(
        &self,
        _source: &str,
        _options: &ParseOptions,
    ) -> Result<Vec<Event>, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize with default options
    fn serialize(&self, events: &[Event]) -> Result<String, FormatError> {
        self.serialize_with_options(events, &RenderOptions::default())
    }

    /// Serialize an event stream into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize_with_options(
        &self,
        _events: &[Event],
        _options: &RenderOptions,
    ) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
