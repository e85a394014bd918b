//! XHTML format tests
//!
//! Strict XML input through roxmltree.

mod import;
