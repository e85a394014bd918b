//! Markdown format tests
//!
//! Markdown is an output format only; these tests go HTML → events → Markdown.

mod export;
