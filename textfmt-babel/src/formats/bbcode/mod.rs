//! BBCode format implementation
//!
//! Parsing runs a small tag engine over the source and renders HTML; see
//! [`parser`] for the tokenizer and renderer and [`tags`] for the registry of
//! tag rules. Serializing is a separate, much simpler regex reduction (see
//! [`serializer`]); the two directions share no code and are not inverses.
//!
//! # Element Mapping Table
//!
//! | BBCode                      | HTML                                          |
//! |-----------------------------|-----------------------------------------------|
//! | `[b]` `[i]` `[u]` `[s]`     | `<strong>` `<em>` `<u>` `<strike>`            |
//! | `[url=href]text[/url]`      | `url_template`, default `<a href="…">…</a>`   |
//! | `[color=red]`               | `<span style="color:red;">`                   |
//! | `[list]` `[*]`              | `<ul>`/`<ol>` and `<li>`                      |
//! | `[eicon]` `[icon]`          | 50×50 `<img>`                                 |
//! | `[collapse=title]`          | `<details><summary>title</summary>…`          |
//! | `[heading level=N]`         | `<hN>`                                        |
//! | `[code]`                    | literal `[code]` block                        |
//! | line of ≥3 equal characters | `<hr />`                                      |
//! | newline                     | `newline` option, default `<br>`              |
//!
//! # Lossy Conversions
//!
//! - HTML → BBCode only knows the reduction table; headings, lists, collapse
//!   blocks and images survive as raw HTML.
//! - Nested tags of the same name may be mis-paired by the reduction.
//! - A single quote inside a tag option (`[collapse=It's here]`) leaves that tag
//!   and the rest of the input as literal text. A `MalformedTagWarning` is logged.

pub mod parser;
pub mod serializer;
pub mod tags;

pub use parser::{escape_html, BbcodeParser, Token};
pub use tags::{TagCall, TagHandler, TagOptions, TagRegistry, TagRule, TagSpec};

use crate::error::Result;
use crate::format::Format;
use serde::{Deserialize, Serialize};

pub const DEFAULT_URL_TEMPLATE: &str = r#"<a href="{href}">{text}</a>"#;

/// Parser-wide BBCode settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BbcodeOptions {
    /// Replacement for top-level newlines
    pub newline: String,
    /// Anchor template with `{href}` and `{text}` placeholders
    pub url_template: String,
    pub escape_html: bool,
    pub replace_links: bool,
    pub replace_cosmetic: bool,
    /// Drop unknown tags instead of keeping them as text
    pub drop_unrecognized: bool,
    /// Shortest run of one repeated character treated as a horizontal rule
    pub hr_min_run: usize,
}

impl Default for BbcodeOptions {
    fn default() -> Self {
        BbcodeOptions {
            newline: "<br>".to_string(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            escape_html: true,
            replace_links: true,
            replace_cosmetic: true,
            drop_unrecognized: false,
            hr_min_run: 3,
        }
    }
}

/// Format implementation for BBCode
#[derive(Default)]
pub struct BbcodeFormat {
    parser: BbcodeParser,
}

impl BbcodeFormat {
    pub fn new(parser: BbcodeParser) -> Self {
        BbcodeFormat { parser }
    }

    pub fn parser(&self) -> &BbcodeParser {
        &self.parser
    }
}

impl Format for BbcodeFormat {
    fn name(&self) -> &str {
        "bbcode"
    }

    fn description(&self) -> &str {
        "BBCode forum markup with custom site tags"
    }

    fn file_extensions(&self) -> &[&str] {
        &["bbcode", "bb"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String> {
        self.parser.format(source)
    }

    fn serialize(&self, html: &str) -> Result<String> {
        Ok(serializer::serialize_to_bbcode(html))
    }
}
