//! cf format implementation
//!
//! cf is the Markdown dialect used by the cf profile pages. It differs from
//! CommonMark only in its emphasis markers:
//!
//! | HTML       | cf           |
//! |------------|--------------|
//! | `<strong>` | `'''bold'''` |
//! | `<em>`     | `''italic''` |
//!
//! Parsing rewrites the markers to `**`/`*` and compiles the result as
//! CommonMark. Serializing renders Markdown with the cf emphasis strategy,
//! flattens inline links (see [`crate::common::links`]) and strips the
//! converter's `\_`/`\*` escapes.

use crate::common::links::{rewrite_links, unescape_cf, LinkStyle};
use crate::error::Result;
use crate::format::Format;
use crate::formats::markdown::{parser::parse_from_markdown, MarkdownConverter, MarkdownOptions};

/// Rewrite cf emphasis markers into CommonMark ones.
///
/// Triple quotes are replaced first so `'''` never reads as `''` + `'`.
pub fn cf_to_markdown(source: &str) -> String {
    source.replace("'''", "**").replace("''", "*")
}

/// Format implementation for the cf dialect
pub struct CfFormat {
    converter: MarkdownConverter,
}

impl CfFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        CfFormat {
            converter: MarkdownConverter::cf(options),
        }
    }
}

impl Default for CfFormat {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

impl Format for CfFormat {
    fn name(&self) -> &str {
        "cf"
    }

    fn description(&self) -> &str {
        "cf Markdown dialect ('''bold''', ''italic'', flattened links)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["cf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String> {
        Ok(parse_from_markdown(&cf_to_markdown(source)))
    }

    fn serialize(&self, html: &str) -> Result<String> {
        let markdown = self.converter.convert(html);
        let flattened = rewrite_links(&markdown, LinkStyle::Cf);
        Ok(unescape_cf(&flattened).trim().to_string())
    }
}
