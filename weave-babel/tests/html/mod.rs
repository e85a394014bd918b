//! HTML format tests
//!
//! Parsing through html5ever and serialization through the HTML sink.

mod export;
mod import;

pub(crate) const KITCHENSINK: &str = include_str!("fixtures/kitchensink.html");
