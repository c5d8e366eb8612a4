//! Markdown parsing (Markdown → HTML)
//!
//! Compilation is delegated to `comrak`. Raw HTML in the source is passed
//! through untouched (sanitizing is the document's job) and bare URLs are not
//! auto-linked.

use comrak::{markdown_to_html, ComrakOptions};

/// Compile CommonMark source to HTML
pub fn parse_from_markdown(source: &str) -> String {
    markdown_to_html(source, &default_comrak_options())
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options.extension.autolink = false;
    options.render.unsafe_ = true;
    options
}
