//! Shared configuration loader for the weave toolchain.
//!
//! `defaults/weave.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`WeaveConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use weave_babel::options::{ParseOptions, RenderOptions};
use weave_babel::parser::UnknownTagPolicy;

const DEFAULT_TOML: &str = include_str!("../defaults/weave.default.toml");

/// Top-level configuration consumed by weave applications.
#[derive(Debug, Clone, Deserialize)]
pub struct WeaveConfig {
    pub parse: ParseConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// Structural parser knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub unknown_tags: UnknownTagPolicy,
}

impl From<&ParseConfig> for ParseOptions {
    fn from(config: &ParseConfig) -> Self {
        ParseOptions {
            unknown_tags: config.unknown_tags,
        }
    }
}

/// Output knobs shared by the sink formats, plus per-format groups.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub max_section_level: usize,
    pub html: HtmlConfig,
    pub markdown: MarkdownConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub fenced_code: bool,
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        let title = Some(config.html.title.trim())
            .filter(|title| !title.is_empty())
            .map(str::to_string);
        RenderOptions {
            max_section_level: config.max_section_level,
            title,
            fenced_code: config.markdown.fenced_code,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// A `tracing` filter directive, e.g. `warn` or `weave_babel=debug`.
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    /// A `render.max_section_level` of 0 is rejected, as `RenderOptions::apply`
    /// does for `--extra-max-section-level 0`.
    pub fn build(self) -> Result<WeaveConfig, ConfigError> {
        let config: WeaveConfig = self.builder.build()?.try_deserialize()?;
        if config.render.max_section_level == 0 {
            return Err(ConfigError::Message(
                "render.max_section_level must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WeaveConfig, ConfigError> {
    Loader::new().build()
}
