//! Flattens a [`DocNode`] tree back into events.
//!
//! Pre-order walk: a container emits its begin event, then its children,
//! then its end event. This is the exact inverse of
//! [`TreeBuilder`](super::TreeBuilder).

use super::nodes::DocNode;
use crate::listener::{Event, EventRecorder, Listener};

/// Emit every node, in order, to `listener`.
pub fn walk<L: Listener + ?Sized>(nodes: &[DocNode], listener: &mut L) {
    for node in nodes {
        match node {
            DocNode::Leaf(event) => listener.on_event(event),
            DocNode::Container(container) => {
                listener.on_event(&container.begin);
                walk(&container.children, listener);
                listener.on_event(&container.end);
            }
        }
    }
}

pub fn tree_to_events(nodes: &[DocNode]) -> Vec<Event> {
    let mut recorder = EventRecorder::new();
    walk(nodes, &mut recorder);
    recorder.into_events()
}
