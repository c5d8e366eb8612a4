//! Plaintext format implementation
//!
//! Output only: the text of every text node in document order, with
//! `script`, `style` and `head` content skipped, trimmed. Whitespace inside
//! the text is kept as written; no layout is reconstructed.

use crate::common::dom::{parse_html, text_content};
use crate::error::Result;
use crate::format::Format;

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "head", "template"];

/// Extract the visible text of an HTML string
pub fn serialize_to_plaintext(html: &str) -> String {
    let dom = parse_html(html);
    text_content(&dom.document, HIDDEN_ELEMENTS).trim().to_string()
}

/// Format implementation for plaintext
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextFormat;

impl Format for PlaintextFormat {
    fn name(&self) -> &str {
        "plaintext"
    }

    fn description(&self) -> &str {
        "Plain text with all markup removed"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, html: &str) -> Result<String> {
        Ok(serialize_to_plaintext(html))
    }
}
