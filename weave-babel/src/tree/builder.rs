//! Rebuilds a [`DocNode`] tree from an event stream.
//!
//! # The Algorithm
//!
//!     A stack holds the open containers. A begin event pushes a new container
//!     whose children start empty. Singletons are appended to the container on
//!     top of the stack (or to the roots when nothing is open). An end event
//!     pops the top container, checks that it is the same construct, and
//!     appends the finished node to its parent.
//!
//!     [`Listener::on_event`] cannot fail, so the first error is kept and
//!     every later event is ignored. [`TreeBuilder::finish`] reports it.

use super::nodes::{Container, DocNode};
use crate::listener::{Event, EventKind, EventRole, Listener};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("unexpected end event {found}: nothing is open")]
    UnexpectedEnd { found: String },
    #[error("mismatched events: expected the end of {expected:?}, found {found}")]
    Mismatched { expected: EventKind, found: String },
    #[error("unclosed containers: {0} nodes remain on the stack")]
    Unclosed(usize),
}

#[derive(Debug, Default)]
pub struct TreeBuilder {
    roots: Vec<DocNode>,
    stack: Vec<(Event, Vec<DocNode>)>,
    error: Option<TreeError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Top-level nodes, once every container has been closed.
    pub fn finish(self) -> Result<Vec<DocNode>, TreeError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if !self.stack.is_empty() {
            return Err(TreeError::Unclosed(self.stack.len()));
        }
        Ok(self.roots)
    }

    fn push_node(&mut self, node: DocNode) {
        match self.stack.last_mut() {
            Some((_, children)) => children.push(node),
            None => self.roots.push(node),
        }
    }

    fn close(&mut self, end: &Event) -> Result<(), TreeError> {
        let (begin, children) = self.stack.pop().ok_or_else(|| TreeError::UnexpectedEnd {
            found: end.to_string(),
        })?;
        if begin.kind() != end.kind() {
            return Err(TreeError::Mismatched {
                expected: begin.kind(),
                found: end.to_string(),
            });
        }
        self.push_node(DocNode::Container(Container {
            begin,
            end: end.clone(),
            children,
        }));
        Ok(())
    }
}

impl Listener for TreeBuilder {
    fn on_event(&mut self, event: &Event) {
        if self.error.is_some() {
            return;
        }
        match event.role() {
            EventRole::Begin => self.stack.push((event.clone(), Vec::new())),
            EventRole::Singleton => self.push_node(DocNode::Leaf(event.clone())),
            EventRole::End => {
                if let Err(error) = self.close(event) {
                    self.error = Some(error);
                }
            }
        }
    }
}
