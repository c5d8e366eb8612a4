//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name. A registry is configured
//! once and then only read, so a single instance can serve every conversion
//! in the process.

use crate::error::{Error, Result};
use crate::format::Format;
use crate::formats::bbcode::{BbcodeFormat, BbcodeOptions, BbcodeParser};
use crate::formats::cf::CfFormat;
use crate::formats::discord::DiscordFormat;
use crate::formats::html::HtmlFormat;
use crate::formats::markdown::{MarkdownFormat, MarkdownOptions};
use crate::formats::plaintext::PlaintextFormat;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

/// The process-wide registry with the built-in formats and default options.
///
/// It is never mutated after initialization; build your own
/// [`FormatRegistry`] to customise tags or rendering options.
pub fn default_registry() -> &'static FormatRegistry {
    &DEFAULT_REGISTRY
}

/// Options used when building the built-in formats
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub bbcode: BbcodeOptions,
    pub markdown: MarkdownOptions,
}

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let html = registry.parse("[b]hi[/b]", "bbcode")?;
/// let md = registry.serialize(&html, "markdown")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| Error::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Names of the formats that can be used as input (sorted)
    pub fn list_input_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .formats
            .values()
            .filter(|f| f.supports_parsing())
            .map(|f| f.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Names of the formats that can be produced as output (sorted)
    pub fn list_output_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .formats
            .values()
            .filter(|f| f.supports_serialization())
            .map(|f| f.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        for format in self.formats.values() {
            if format.file_extensions().contains(&extension) {
                return Some(format.name().to_string());
            }
        }

        None
    }

    /// Convert source text in the given format into canonical HTML
    pub fn parse(&self, source: &str, format: &str) -> Result<String> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(Error::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        tracing::trace!(format, len = source.len(), "parsing into html");
        fmt.parse(source)
    }

    /// Convert canonical HTML into the given format
    pub fn serialize(&self, html: &str, format: &str) -> Result<String> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(Error::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        tracing::trace!(format, len = html.len(), "serializing from html");
        fmt.serialize(html)
    }

    /// Create a registry with the built-in formats configured by `options`
    pub fn with_options(options: &ConvertOptions) -> Self {
        let mut registry = Self::new();

        registry.register(HtmlFormat);
        registry.register(PlaintextFormat);
        registry.register(BbcodeFormat::new(BbcodeParser::with_options(
            options.bbcode.clone(),
        )));
        registry.register(MarkdownFormat::new(options.markdown.clone()));
        registry.register(CfFormat::new(options.markdown.clone()));
        registry.register(DiscordFormat::new(options.markdown.clone()));

        registry
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        Self::with_options(&ConvertOptions::default())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
