//! Shared configuration loader for the textfmt toolchain.
//!
//! `defaults/textfmt.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`TextfmtConfig`], then convert the sections into the library's option
//! types (`DocumentOptions`, `BbcodeOptions`, `MarkdownOptions`).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use textfmt_babel::{
    BbcodeOptions, ConvertOptions, DocumentOptions, HeadingStyle, MarkdownOptions, NewlineStyle,
    SanitizerConfig,
};

const DEFAULT_TOML: &str = include_str!("../defaults/textfmt.default.toml");

/// Top-level configuration consumed by textfmt applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TextfmtConfig {
    pub sanitize: SanitizeConfig,
    pub bbcode: BbcodeConfig,
    pub markdown: MarkdownConfig,
}

impl TextfmtConfig {
    /// Options for building the format registry.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            bbcode: (&self.bbcode).into(),
            markdown: (&self.markdown).into(),
        }
    }

    /// Options for constructing documents.
    pub fn document_options(&self) -> DocumentOptions {
        (&self.sanitize).into()
    }
}

/// Sanitizer switch plus its allow-list knobs. Unset knobs keep the
/// sanitizer's own defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SanitizeConfig {
    pub enabled: bool,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub add_tags: Vec<String>,
    pub clean_content_tags: Option<Vec<String>>,
    pub generic_attributes: Option<Vec<String>>,
    pub tag_attributes: Option<BTreeMap<String, Vec<String>>>,
    pub url_schemes: Option<Vec<String>>,
    pub link_rel: Option<String>,
    pub strip_comments: Option<bool>,
}

impl From<&SanitizeConfig> for SanitizerConfig {
    fn from(config: &SanitizeConfig) -> Self {
        SanitizerConfig {
            tags: config.tags.clone(),
            add_tags: config.add_tags.clone(),
            clean_content_tags: config.clean_content_tags.clone(),
            generic_attributes: config.generic_attributes.clone(),
            tag_attributes: config.tag_attributes.clone(),
            url_schemes: config.url_schemes.clone(),
            link_rel: config.link_rel.clone(),
            strip_comments: config.strip_comments,
        }
    }
}

impl From<&SanitizeConfig> for DocumentOptions {
    fn from(config: &SanitizeConfig) -> Self {
        DocumentOptions {
            safe_html: config.enabled,
            sanitizer: config.into(),
        }
    }
}

impl From<SanitizeConfig> for DocumentOptions {
    fn from(config: SanitizeConfig) -> Self {
        (&config).into()
    }
}

/// Mirrors the knobs exposed by the BBCode engine.
#[derive(Debug, Clone, Deserialize)]
pub struct BbcodeConfig {
    pub newline: String,
    pub url_template: String,
    pub escape_html: bool,
    pub replace_links: bool,
    pub replace_cosmetic: bool,
    pub drop_unrecognized: bool,
    pub hr_min_run: usize,
}

impl From<&BbcodeConfig> for BbcodeOptions {
    fn from(config: &BbcodeConfig) -> Self {
        BbcodeOptions {
            newline: config.newline.clone(),
            url_template: config.url_template.clone(),
            escape_html: config.escape_html,
            replace_links: config.replace_links,
            replace_cosmetic: config.replace_cosmetic,
            drop_unrecognized: config.drop_unrecognized,
            hr_min_run: config.hr_min_run,
        }
    }
}

impl From<BbcodeConfig> for BbcodeOptions {
    fn from(config: BbcodeConfig) -> Self {
        BbcodeOptions {
            newline: config.newline,
            url_template: config.url_template,
            escape_html: config.escape_html,
            replace_links: config.replace_links,
            replace_cosmetic: config.replace_cosmetic,
            drop_unrecognized: config.drop_unrecognized,
            hr_min_run: config.hr_min_run,
        }
    }
}

/// Markdown output knobs, shared by the Markdown, cf and Discord formats.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub heading_style: HeadingStyle,
    pub newline_style: NewlineStyle,
    pub bullets: String,
    pub escape_special: bool,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            heading_style: config.heading_style,
            newline_style: config.newline_style,
            bullets: config.bullets.clone(),
            escape_special: config.escape_special,
        }
    }
}

impl From<MarkdownConfig> for MarkdownOptions {
    fn from(config: MarkdownConfig) -> Self {
        MarkdownOptions {
            heading_style: config.heading_style,
            newline_style: config.newline_style,
            bullets: config.bullets,
            escape_special: config.escape_special,
        }
    }
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
    pub fn build(self) -> Result<TextfmtConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TextfmtConfig, ConfigError> {
    Loader::new().build()
}
