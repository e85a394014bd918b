//! Event trace format
//!
//! One event per line in its compact `Display` form, indented two spaces per
//! open container. Begin and end events of a pair sit at the same depth, so
//! the trace reads like the tree it describes:
//!
//!     begin_document
//!       begin_paragraph
//!         on_word("Hello")
//!       end_paragraph
//!     end_document
//!
//! Serialization only. The trace is meant for people and snapshot tests.

use crate::error::FormatError;
use crate::format::Format;
use crate::listener::Event;
use crate::options::RenderOptions;
use std::fmt::Write;

const INDENT: &str = "  ";

pub struct EventsFormat;

impl Format for EventsFormat {
    fn name(&self) -> &str {
        "events"
    }

    fn description(&self) -> &str {
        "Indented event trace"
    }

    fn file_extensions(&self) -> &[&str] {
        &["events"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize_with_options(
        &self,
        events: &[Event],
        _options: &RenderOptions,
    ) -> Result<String, FormatError> {
        Ok(to_trace(events))
    }
}

/// Render an event stream as an indented trace.
pub fn to_trace(events: &[Event]) -> String {
    let mut output = String::new();
    let mut depth = 0usize;
    for event in events {
        if event.is_end() {
            depth = depth.saturating_sub(1);
        }
        // Writing into a String cannot fail.
        let _ = writeln!(output, "{}{event}", INDENT.repeat(depth));
        if event.is_begin() {
            depth += 1;
        }
    }
    output
}
