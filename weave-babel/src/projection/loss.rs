//! Diagnostics for constructs a sink could not express faithfully.

use super::sink::Numbering;
use crate::listener::{EventKind, Format, ListType};
use std::fmt;

/// How a construct was degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// Dropped; nested content was still forwarded.
    Elided,
    /// A format run the sink has no style for.
    FormatDropped(Format),
    /// Header level reduced to the sink's ceiling.
    Clamped { from: usize, to: usize },
    /// List numbering replaced by one the sink supports.
    Narrowed { from: ListType, to: Numbering },
}

/// One recorded projection loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionLoss {
    pub construct: EventKind,
    pub degradation: Degradation,
}

impl ProjectionLoss {
    pub fn new(construct: EventKind, degradation: Degradation) -> Self {
        Self {
            construct,
            degradation,
        }
    }
}

impl fmt::Display for ProjectionLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.degradation {
            Degradation::Elided => write!(f, "{:?} elided", self.construct),
            Degradation::FormatDropped(format) => write!(f, "{format} formatting dropped"),
            Degradation::Clamped { from, to } => {
                write!(f, "{:?} level {from} clamped to {to}", self.construct)
            }
            Degradation::Narrowed { from, to } => {
                write!(f, "{from:?} list numbered as {to}")
            }
        }
    }
}
