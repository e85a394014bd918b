//! Event-driven markup conversion
//!
//!     This crate converts documents between markup formats through a flat stream of document
//!     events. A source format is tokenized, run through a structural parser that turns tags into
//!     properly nested begin/end events, and the resulting stream is replayed into whatever
//!     consumes it: a recorder, a tree builder, or a projection onto a narrower output format.
//!
//!     This is a pure lib, that is, it powers weave-cli but is shell agnostic: no code here
//!     prints, reads env vars or assumes a terminal.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError
//!     ├── format.rs               # Format trait definition
//!     ├── options.rs              # ParseOptions / RenderOptions
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── listener                # Event enum, Listener trait, recorder
//!     ├── parser                  # Tokens, tag handlers, structural parser
//!     ├── projection              # SectionSink and the SinkListener adapter
//!     ├── tree                    # Nested form of an event stream
//!     └── formats
//!         ├── common              # Markup DOM → tokens, shared by html and xhtml
//!         ├── <format>
//!         │   ├── parser.rs       # Parser implementation
//!         │   ├── serializer.rs   # Serializer implementation
//!         │   └── mod.rs
//!
//! Core Algorithms
//!
//!     Two pieces carry the weight, and both are format agnostic:
//!
//!     - The structural parser (./parser/mod.rs) keeps a stack of open tags. Each tag's handler
//!       decides at open time which events to emit on entry and on exit, so closing a tag needs
//!       nothing but the top of the stack. Mismatched or unclosed tags are reported with the open
//!       stack, never repaired.
//!     - The projection adapter (./projection/adapter.rs) maps the full event vocabulary onto a
//!       sink that only knows sections, paragraphs, lists, tables and a few inline styles. It
//!       clamps header depth, elides what the sink cannot show while keeping the content, and
//!       records every such loss.
//!
//!     Format code then only deals with its own library's data model.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait. See ./format.rs
//!     - html: parsing (html5ever) and serialization (RcDom)
//!     - xhtml: parsing (roxmltree)
//!     - markdown: serialization (comrak)
//!     - events, json, treeviz: serialization, for inspection and tests
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.

pub mod error;
pub mod format;
pub mod formats;
pub mod listener;
pub mod options;
pub mod parser;
pub mod projection;
pub mod registry;
pub mod tree;

pub use error::FormatError;
pub use format::Format;
pub use listener::{replay, Event, EventKind, EventRecorder, Listener};
pub use options::{ParseOptions, RenderOptions};
pub use registry::FormatRegistry;
