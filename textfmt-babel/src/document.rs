//! Document facade
//!
//! A [`Document`] holds one piece of content as canonical HTML. It is built
//! from any input format and renders any output format on request; outputs are
//! computed fresh on every call and never cached.
//!
//! ```ignore
//! let doc = Document::from_bbcode("[b]hi[/b]", DocumentOptions::default())?;
//! assert_eq!(doc.to_markdown()?, "**hi**");
//! assert_eq!(doc.to_bbcode()?, "[b]hi[/b]<br>");
//! ```
//!
//! With `safe_html` enabled the HTML is sanitized on construction and on every
//! [`Document::set_html`]; no other path changes it.

use crate::error::Result;
use crate::registry::{default_registry, FormatRegistry};
use crate::sanitize::SanitizerConfig;
use serde::{Deserialize, Serialize};

/// Formats a document can be built from
pub const SUPPORTED_IN_FORMATS: &[&str] = &["cf", "html", "bbcode", "markdown"];

/// Formats a document can be rendered to
pub const SUPPORTED_OUT_FORMATS: &[&str] =
    &["cf", "html", "bbcode", "markdown", "plaintext", "discord"];

/// Output formats in the order [`Document::render_all`] lists them
const OVERVIEW_ORDER: &[&str] = &["html", "plaintext", "bbcode", "markdown", "cf", "discord"];

/// Construction options for a [`Document`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Sanitize the HTML whenever it is set
    pub safe_html: bool,
    pub sanitizer: SanitizerConfig,
}

impl DocumentOptions {
    pub fn safe() -> Self {
        DocumentOptions {
            safe_html: true,
            ..Self::default()
        }
    }
}

/// Content held as canonical HTML, convertible to every output format
#[derive(Clone)]
pub struct Document<'r> {
    html: String,
    options: DocumentOptions,
    registry: &'r FormatRegistry,
}

impl Document<'static> {
    pub fn from_bbcode(source: &str, options: DocumentOptions) -> Result<Self> {
        Self::from_format("bbcode", source, options)
    }

    pub fn from_html(html: &str, options: DocumentOptions) -> Result<Self> {
        Self::from_format("html", html, options)
    }

    pub fn from_markdown(source: &str, options: DocumentOptions) -> Result<Self> {
        Self::from_format("markdown", source, options)
    }

    pub fn from_cf(source: &str, options: DocumentOptions) -> Result<Self> {
        Self::from_format("cf", source, options)
    }

    /// Build from any parsing format of the default registry
    pub fn from_format(format: &str, source: &str, options: DocumentOptions) -> Result<Self> {
        Document::parse_with(default_registry(), format, source, options)
    }
}

impl<'r> Document<'r> {
    /// Build from `source` in `format`, converting with `registry`
    pub fn parse_with(
        registry: &'r FormatRegistry,
        format: &str,
        source: &str,
        options: DocumentOptions,
    ) -> Result<Self> {
        let html = registry.parse(source, format)?;
        Self::with_registry(registry, html, options)
    }

    /// Wrap existing HTML, converting with `registry`
    pub fn with_registry(
        registry: &'r FormatRegistry,
        html: impl Into<String>,
        options: DocumentOptions,
    ) -> Result<Self> {
        let mut doc = Document {
            html: String::new(),
            options,
            registry,
        };
        doc.set_html(html)?;
        Ok(doc)
    }

    /// Replace the HTML, sanitizing it first when `safe_html` is enabled
    pub fn set_html(&mut self, html: impl Into<String>) -> Result<()> {
        let html = html.into();
        self.html = if self.options.safe_html {
            self.options.sanitizer.clean(&html)?
        } else {
            html
        };
        Ok(())
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn to_html(&self) -> Result<String> {
        self.to_format("html")
    }

    pub fn to_plaintext(&self) -> Result<String> {
        self.to_format("plaintext")
    }

    pub fn to_markdown(&self) -> Result<String> {
        self.to_format("markdown")
    }

    pub fn to_cf(&self) -> Result<String> {
        self.to_format("cf")
    }

    pub fn to_discord_markdown(&self) -> Result<String> {
        self.to_format("discord")
    }

    pub fn to_bbcode(&self) -> Result<String> {
        self.to_format("bbcode")
    }

    /// Render with any serializing format of the registry
    pub fn to_format(&self, format: &str) -> Result<String> {
        self.registry.serialize(&self.html, format)
    }

    /// Every output format with its rendering, in overview order
    pub fn render_all(&self) -> Result<Vec<(&'static str, String)>> {
        OVERVIEW_ORDER
            .iter()
            .map(|&format| Ok((format, self.to_format(format)?)))
            .collect()
    }
}

impl std::fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("html", &self.html)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
