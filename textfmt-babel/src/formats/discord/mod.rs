//! Discord Markdown format implementation
//!
//! Output only. Discord renders standard Markdown emphasis but not inline
//! links, so links are flattened to `text ( <url> )`; the angle brackets stop
//! the client from unfurling a preview.

use crate::common::links::{rewrite_links, LinkStyle};
use crate::error::Result;
use crate::format::Format;
use crate::formats::markdown::{MarkdownConverter, MarkdownOptions};

/// Format implementation for Discord-flavoured Markdown
pub struct DiscordFormat {
    converter: MarkdownConverter,
}

impl DiscordFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        DiscordFormat {
            converter: MarkdownConverter::standard(options),
        }
    }
}

impl Default for DiscordFormat {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

impl Format for DiscordFormat {
    fn name(&self) -> &str {
        "discord"
    }

    fn description(&self) -> &str {
        "Discord chat Markdown (links flattened)"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, html: &str) -> Result<String> {
        let markdown = self.converter.convert(html);
        Ok(rewrite_links(&markdown, LinkStyle::Discord).trim().to_string())
    }
}
