//! Format implementations
//!
//! This module contains the format implementations that turn source text into
//! event streams and event streams into text.

pub mod common;
pub mod events;
pub mod html;
pub mod icons;
pub mod json;
pub mod markdown;
pub mod treeviz;
pub mod xhtml;

pub use events::EventsFormat;
pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
pub use xhtml::XhtmlFormat;
