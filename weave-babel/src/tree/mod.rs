//! Document tree built from the event stream.
//!
//!     The event stream is the interchange format, but some consumers (the
//!     treeviz output, tests) want the nested form. [`TreeBuilder`] is a
//!     [`Listener`](crate::listener::Listener) that reconstructs it with a
//!     stack; [`tree_to_events`] and [`walk`] go the other way. The two are
//!     inverses: events → tree → events gives back the original stream.

mod builder;
mod nodes;
mod walk;

pub use builder::{TreeBuilder, TreeError};
pub use nodes::{Container, DocNode};
pub use walk::{tree_to_events, walk};
