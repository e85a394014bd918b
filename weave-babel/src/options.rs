//! Options accepted by format parsers and serializers.
//!
//! Both option sets can be filled from a loose string map (the CLI's
//! `--extra-<key> <value>` flags) with `apply`. Keys are kebab-case.

use crate::error::FormatError;
use crate::parser::UnknownTagPolicy;
use crate::projection::DEFAULT_MAX_SECTION_LEVEL;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub unknown_tags: UnknownTagPolicy,
}

impl ParseOptions {
    /// Apply `unknown-tags`. Keys meant for serializers are ignored.
    pub fn apply(&mut self, options: &HashMap<String, String>) -> Result<(), FormatError> {
        for (key, value) in options {
            if key == "unknown-tags" {
                self.unknown_tags = value
                    .parse()
                    .map_err(|message| invalid(key, message))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Deepest section level emitted; deeper headers are clamped.
    pub max_section_level: usize,
    /// Document title, used when the source has none.
    pub title: Option<String>,
    /// Markdown: fenced (true) or indented code blocks.
    pub fenced_code: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_section_level: DEFAULT_MAX_SECTION_LEVEL,
            title: None,
            fenced_code: true,
        }
    }
}

impl RenderOptions {
    /// Apply `max-section-level`, `title` and `fenced-code`.
    ///
    /// `unknown-tags` belongs to the parser and is skipped; any other key is
    /// rejected.
    pub fn apply(&mut self, options: &HashMap<String, String>) -> Result<(), FormatError> {
        for (key, value) in options {
            match key.as_str() {
                "max-section-level" => {
                    let level: usize = value
                        .parse()
                        .map_err(|_| invalid(key, format!("'{value}' is not a number")))?;
                    if level == 0 {
                        return Err(invalid(key, "must be at least 1".to_string()));
                    }
                    self.max_section_level = level;
                }
                "title" => self.title = Some(value.clone()),
                "fenced-code" => {
                    self.fenced_code = parse_bool(value).ok_or_else(|| {
                        invalid(key, format!("'{value}' is not true or false"))
                    })?;
                }
                "unknown-tags" => {}
                _ => return Err(invalid(key, "not recognised".to_string())),
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "yes" | "1" | "" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn invalid(key: &str, message: String) -> FormatError {
    FormatError::InvalidOption {
        key: key.to_string(),
        message,
    }
}
