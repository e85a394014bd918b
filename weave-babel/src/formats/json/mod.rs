//! JSON format
//!
//! The event stream as a pretty-printed JSON array. Each event is an object
//! tagged by its `event` name, e.g. `{"event": "on_word", "word": "Hello"}`.

use crate::error::FormatError;
use crate::format::Format;
use crate::listener::Event;
use crate::options::RenderOptions;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Event stream as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize_with_options(
        &self,
        events: &[Event],
        _options: &RenderOptions,
    ) -> Result<String, FormatError> {
        serde_json::to_string_pretty(events)
            .map_err(|e| FormatError::Serialization(format!("JSON serialization failed: {e}")))
    }
}
