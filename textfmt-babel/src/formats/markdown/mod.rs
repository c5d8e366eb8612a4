//! Markdown format implementation
//!
//! # Library Choice
//!
//! Parsing (Markdown → HTML) is delegated to `comrak`, a CommonMark compliant
//! compiler. Serializing (HTML → Markdown) walks the `html5ever` tree of the
//! canonical HTML (see [`serializer`]); the same walker, configured with a
//! different [`Emphasis`], backs the cf and Discord formats.
//!
//! # Element Mapping Table
//!
//! | HTML                         | Markdown                               |
//! |------------------------------|----------------------------------------|
//! | `<p>`, `<div>`, `<details>`  | paragraph (blank-line separated)       |
//! | `<h1>`…`<h6>`                | `#` headings, or setext for h1/h2      |
//! | `<strong>`, `<b>`            | `**text**`                             |
//! | `<em>`, `<i>`                | `*text*`                               |
//! | `<s>`, `<del>`, `<strike>`   | `~~text~~`                             |
//! | `<code>` / `<pre>`           | `` `code` `` / fenced block            |
//! | `<a href title>`             | `[text](href "title")`                 |
//! | `<img src alt title>`        | `![alt](src "title")`                  |
//! | `<ul>` / `<ol start>`        | `*`/`+`/`-` by depth / numbered items  |
//! | `<blockquote>`               | `> ` prefixed lines                    |
//! | `<br>`                       | two trailing spaces or a backslash     |
//! | `<hr>`                       | `---`                                  |
//! | `<script>`, `<style>`        | dropped                                |
//!
//! # Lossy Conversions
//!
//! - Elements without a Markdown form (`<u>`, `<span>`, custom tags) keep only
//!   their text.
//! - `*` and `_` in text are backslash-escaped; the escapes survive a trip
//!   back through the Markdown compiler but not through plain-text readers.

pub mod parser;
pub mod serializer;

pub use serializer::{Emphasis, MarkdownConverter};

use crate::error::Result;
use crate::format::Format;
use serde::{Deserialize, Serialize};

/// Heading syntax used for h1/h2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
    #[default]
    Atx,
    Setext,
}

/// Hard line break syntax
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlineStyle {
    #[default]
    Spaces,
    Backslash,
}

/// Markdown output settings shared by the Markdown, cf and Discord formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    pub heading_style: HeadingStyle,
    pub newline_style: NewlineStyle,
    /// Bullet characters for unordered lists, cycled by nesting depth
    pub bullets: String,
    /// Backslash-escape `*` and `_` in text
    pub escape_special: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        MarkdownOptions {
            heading_style: HeadingStyle::default(),
            newline_style: NewlineStyle::default(),
            bullets: "*+-".to_string(),
            escape_special: true,
        }
    }
}

/// Format implementation for Markdown
pub struct MarkdownFormat {
    converter: MarkdownConverter,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        MarkdownFormat {
            converter: MarkdownConverter::standard(options),
        }
    }
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, html: &str) -> Result<String> {
        Ok(self.converter.convert(html))
    }
}
