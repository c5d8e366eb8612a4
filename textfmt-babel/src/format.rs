//! Format trait definition
//!
//! Every dialect is a [`Format`]. HTML is the canonical form: parsing turns a
//! dialect's source into HTML, serializing turns canonical HTML into the
//! dialect. Formats never talk to each other directly.

use crate::error::{Error, Result};

/// Trait for document formats
///
/// Implementors provide conversion between their text representation and the
/// canonical HTML string. Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, html: &str) -> Result<String> {
///         Ok(html.to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "bbcode", "markdown", "cf")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → HTML)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (HTML → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Convert source text in this format into canonical HTML
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<String> {
        Err(Error::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Convert canonical HTML into this format
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _html: &str) -> Result<String> {
        Err(Error::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
