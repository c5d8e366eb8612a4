//! Link post-processing for Markdown dialects that do not render inline links.
//!
//! The Markdown converter always writes links as `[text](url)`. Chat-style
//! targets show links raw, so every inline link is rewritten into a readable
//! form:
//!
//! | target  | text == url   | otherwise               |
//! |---------|---------------|-------------------------|
//! | cf      | `url`         | `text ( url )`          |
//! | Discord | `url`         | `text ( <url> )`        |
//!
//! Discord wraps the target in `<…>` so the client does not unfurl a preview.
//! The comparison trims both sides. Every link is rewritten exactly once, in a
//! single left-to-right pass over the original text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static INLINE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?P<text>.*?)\]\((?P<url>.*?)\)").expect("INLINE_LINK: hardcoded regex is valid")
});

/// Dialect a link is rewritten for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    Cf,
    Discord,
}

impl LinkStyle {
    fn render(self, text: &str, url: &str) -> String {
        if text.trim() == url.trim() {
            return url.to_string();
        }
        match self {
            LinkStyle::Cf => format!("{text} ( {url} )"),
            LinkStyle::Discord => format!("{text} ( <{url}> )"),
        }
    }
}

/// Rewrite every inline Markdown link in `markdown` for `style`
pub fn rewrite_links(markdown: &str, style: LinkStyle) -> String {
    INLINE_LINK
        .replace_all(markdown, |caps: &Captures<'_>| style.render(&caps["text"], &caps["url"]))
        .into_owned()
}

/// Undo the converter's `\_` and `\*` escapes for the cf dialect.
///
/// Escaped asterisks are dropped rather than unescaped, so `2\*3` becomes
/// `23`. Existing cf content depends on this output.
// TODO: escape cf text at conversion time and remove this pass.
pub fn unescape_cf(markdown: &str) -> String {
    markdown.replace("\\_", "_").replace("\\*", "")
}
