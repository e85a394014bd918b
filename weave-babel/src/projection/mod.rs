//! Projection of the event stream onto narrower targets.
//!
//!     Output formats rarely express everything the event protocol can. A
//!     [`SectionSink`] describes what a target can do: sections up to some
//!     depth, paragraphs, lists, tables, a few inline styles. [`SinkListener`]
//!     sits between the two and applies a fixed set of policies:
//!
//!     - Range clamping: header level L lands on `min(L, max_section_level)`.
//!       The level is remembered at begin time and reused at end time.
//!       A header directly inside an explicit section keeps its sink section
//!       open until the section ends; one nested deeper, e.g. in a list item,
//!       closes its own.
//!     - Elision: groups, metadata, quotations, macro markers and unsupported
//!       format runs produce no sink calls, their content still flows through.
//!       Quotation lines become paragraphs so they do not run together.
//!     - Text fallback: spaces, newlines and special symbols become `text`.
//!     - Narrowing: numbering styles the sink lacks become decimal.
//!
//!     Lossy decisions are recorded as [`ProjectionLoss`] values and logged at
//!     debug level. They never abort a render.

mod adapter;
mod loss;
mod recording;
mod sink;

pub use adapter::SinkListener;
pub use loss::{Degradation, ProjectionLoss};
pub use recording::RecordingSink;
pub use sink::{Numbering, SectionSink, DEFAULT_MAX_SECTION_LEVEL};
