//! Error types for format operations

use crate::parser::ParseError;
use crate::tree::TreeError;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Structural error while turning tags into events
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// The markup front-end rejected the source text
    #[error("Markup error: {0}")]
    Markup(String),
    /// The event stream could not be nested into a tree
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Format does not support the operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// An `--extra-*` style option had an unknown key or a bad value
    #[error("Invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },
}
