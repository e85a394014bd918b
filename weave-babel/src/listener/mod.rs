//! The event protocol every producer and consumer speaks.
//!
//!     A document is a stream of [`Event`]s. Structural constructs (sections,
//!     headers, lists, tables, ...) arrive as begin/end pairs that nest like a
//!     tree, content (words, spaces, images, ...) arrives as singletons. The
//!     parser produces this stream; tree builders, recorders and projection
//!     adapters consume it.
//!
//!     The protocol does not validate nesting. Producers are responsible for
//!     never emitting the end of a construct that is not the innermost open
//!     one, and consumers may rely on that.
//!
//!     Consumers implement [`Listener`] and are expected to match on the full
//!     event set, handling the constructs they cannot express with explicit
//!     no-op arms instead of a catch-all.

pub mod events;
pub mod recorder;
pub mod types;

pub use events::{Event, EventKind, EventRole};
pub use recorder::EventRecorder;
pub use types::{
    Format, HeaderLevel, ListType, MetaData, Parameters, ResourceReference, ResourceType,
};

/// A consumer of document events.
pub trait Listener {
    /// Receive the next event of the stream.
    fn on_event(&mut self, event: &Event);
}

impl<L: Listener + ?Sized> Listener for &mut L {
    fn on_event(&mut self, event: &Event) {
        (**self).on_event(event)
    }
}

impl<L: Listener + ?Sized> Listener for Box<L> {
    fn on_event(&mut self, event: &Event) {
        (**self).on_event(event)
    }
}

/// Feed a recorded event stream into a listener, in order.
pub fn replay<'a, L, I>(events: I, listener: &mut L)
where
    L: Listener + ?Sized,
    I: IntoIterator<Item = &'a Event>,
{
    for event in events {
        listener.on_event(event);
    }
}
