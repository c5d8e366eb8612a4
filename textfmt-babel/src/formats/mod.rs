//! Format implementations
//!
//! Each format converts between its text representation and canonical HTML.
//! Input formats: bbcode, cf, html, markdown. Output formats: all of those
//! plus discord and plaintext.

pub mod bbcode;
pub mod cf;
pub mod discord;
pub mod html;
pub mod markdown;
pub mod plaintext;

pub use bbcode::{BbcodeFormat, BbcodeOptions, BbcodeParser};
pub use cf::CfFormat;
pub use discord::DiscordFormat;
pub use html::HtmlFormat;
pub use markdown::{HeadingStyle, MarkdownFormat, MarkdownOptions, NewlineStyle};
pub use plaintext::PlaintextFormat;
