//! Tag registry for the BBCode engine
//!
//! Every tag the engine understands is a [`TagSpec`]: a rendering rule plus
//! the flags that drive how the engine collects the tag's content. Rules are
//! either a static template or a handler function; the engine dispatches on
//! the [`TagRule`] variant.
//!
//! # Templates
//!
//! Templates use `{key}` placeholders. `{value}` is the rendered inner content,
//! any other key is looked up in the tag options. A placeholder may carry the
//! `slug` filter (`{value|slug}`), which lower-cases and percent-escapes the
//! value for use inside a URL path. Placeholders that cannot be resolved are
//! left verbatim.
//!
//! # Built-in tags
//!
//! | tag        | rule                                                        |
//! |------------|-------------------------------------------------------------|
//! | `b` `i` `u` `s` `sub` `sup` | simple inline templates                    |
//! | `hr`       | standalone `<hr />`                                         |
//! | `list` `*` | `<ul>`/`<ol>` lists with `<li>` items                       |
//! | `quote`    | `<blockquote>`                                              |
//! | `center`   | centered `<div>`                                            |
//! | `color`    | `<span style="color:…;">`                                   |
//! | `url`      | anchor through the parser's `url_template`                  |
//! | `code`     | content wrapped in a `[code]` fenced block                  |
//! | `eicon`    | 50×50 eicon image                                           |
//! | `icon`     | 50×50 avatar image (handler, options merged into template)  |
//! | `collapse` | `<details>` block titled by the `collapse` option           |
//! | `heading`  | `<hN>` with N from the `level` option (default 4)           |

use super::parser::escape_html;
use super::BbcodeOptions;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::collections::HashMap;

pub const EICON_TEMPLATE: &str =
    r#"<img src="https://static.f-list.net/images/eicon/{value|slug}.gif" height=50 width=50>"#;
pub const AVATAR_TEMPLATE: &str =
    r#"<img src="https://static.f-list.net/images/avatar/{value|slug}.png" height=50 width=50>"#;
pub const CODE_TEMPLATE: &str = "[code]\n{value}\n[/code]";
pub const DEFAULT_COLLAPSE_TITLE: &str = "Click to expand";
pub const DEFAULT_HEADING_LEVEL: &str = "4";

/// Characters left alone by the `slug` filter: unreserved URL characters and `/`.
const SLUG_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

static COLOR_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[a-z]+|#[a-f0-9]{3,6})").expect("COLOR_VALUE: hardcoded regex is valid")
});

/// Options attached to an opening tag, in the order they were written.
///
/// Keys are lower-cased by the option parser; values keep their case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    entries: Vec<(String, String)>,
}

impl TagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an option. A replaced option keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The first option key, in source order
    pub fn first_key(&self) -> Option<&str> {
        self.entries.first().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything a rule sees when one tag is rendered
#[derive(Debug, Clone, Copy)]
pub struct TagCall<'a> {
    /// Lower-cased tag name
    pub name: &'a str,
    /// Rendered inner content (empty for standalone tags)
    pub value: &'a str,
    pub options: &'a TagOptions,
    /// Name of the enclosing tag, if any
    pub parent: Option<&'a str>,
    /// Parser-wide settings (newline, url template, ...)
    pub settings: &'a BbcodeOptions,
}

/// Handler signature for dynamic tags
pub type TagHandler = fn(&TagCall<'_>) -> Result<String>;

/// How a tag turns into HTML
#[derive(Debug, Clone)]
pub enum TagRule {
    Static(String),
    Dynamic(TagHandler),
}

/// A registered tag: its rule plus the flags that shape its content
#[derive(Debug, Clone)]
pub struct TagSpec {
    pub rule: TagRule,
    /// Tag has no content and no closing tag (`[hr]`)
    pub standalone: bool,
    /// A newline ends the tag (`[*]`)
    pub newline_closes: bool,
    /// Opening the same tag again ends the current one (`[*]`)
    pub same_tag_closes: bool,
    /// Nested tags are rendered; otherwise the content is taken as text
    pub render_embedded: bool,
    pub transform_newlines: bool,
    pub escape_html: bool,
    pub replace_links: bool,
    pub replace_cosmetic: bool,
    /// Trim whitespace around the rendered content
    pub strip: bool,
    /// Eat the newline directly after the closing tag
    pub swallow_trailing_newline: bool,
}

impl TagSpec {
    pub fn new(rule: TagRule) -> Self {
        TagSpec {
            rule,
            standalone: false,
            newline_closes: false,
            same_tag_closes: false,
            render_embedded: true,
            transform_newlines: true,
            escape_html: true,
            replace_links: true,
            replace_cosmetic: true,
            strip: false,
            swallow_trailing_newline: false,
        }
    }

    pub fn template(template: impl Into<String>) -> Self {
        Self::new(TagRule::Static(template.into()))
    }

    pub fn handler(handler: TagHandler) -> Self {
        Self::new(TagRule::Dynamic(handler))
    }

    pub fn standalone(mut self) -> Self {
        self.standalone = true;
        self
    }

    pub fn newline_closes(mut self) -> Self {
        self.newline_closes = true;
        self
    }

    pub fn same_tag_closes(mut self) -> Self {
        self.same_tag_closes = true;
        self
    }

    pub fn strip(mut self) -> Self {
        self.strip = true;
        self
    }

    pub fn swallow_trailing_newline(mut self) -> Self {
        self.swallow_trailing_newline = true;
        self
    }

    pub fn render_embedded(mut self, enabled: bool) -> Self {
        self.render_embedded = enabled;
        self
    }

    pub fn transform_newlines(mut self, enabled: bool) -> Self {
        self.transform_newlines = enabled;
        self
    }

    pub fn escape_html(mut self, enabled: bool) -> Self {
        self.escape_html = enabled;
        self
    }

    pub fn replace_links(mut self, enabled: bool) -> Self {
        self.replace_links = enabled;
        self
    }

    pub fn replace_cosmetic(mut self, enabled: bool) -> Self {
        self.replace_cosmetic = enabled;
        self
    }

    /// Render one occurrence of this tag
    pub fn render(&self, call: &TagCall<'_>) -> Result<String> {
        match &self.rule {
            TagRule::Static(template) => Ok(fill_template(template, call)),
            TagRule::Dynamic(handler) => handler(call),
        }
    }
}

/// Case-insensitive mapping from tag name to [`TagSpec`]
///
/// Built once during setup, then shared read-only by the parser.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    tags: HashMap<String, TagSpec>,
}

impl TagRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        TagRegistry {
            tags: HashMap::new(),
        }
    }

    /// Register a tag, replacing any previous rule with the same name
    pub fn register(&mut self, name: &str, spec: TagSpec) {
        self.tags.insert(name.to_lowercase(), spec);
    }

    pub fn resolve(&self, name: &str) -> Option<&TagSpec> {
        self.tags
            .get(name)
            .or_else(|| self.tags.get(&name.to_lowercase()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// List registered tag names (sorted)
    pub fn list_tags(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tags.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with the standard BBCode tags and the custom site tags
    pub fn with_defaults() -> Self {
        let mut tags = Self::new();

        tags.register("b", TagSpec::template("<strong>{value}</strong>"));
        tags.register("i", TagSpec::template("<em>{value}</em>"));
        tags.register("u", TagSpec::template("<u>{value}</u>"));
        tags.register("s", TagSpec::template("<strike>{value}</strike>"));
        tags.register("hr", TagSpec::template("<hr />").standalone());
        tags.register("sub", TagSpec::template("<sub>{value}</sub>"));
        tags.register("sup", TagSpec::template("<sup>{value}</sup>"));
        tags.register(
            "list",
            TagSpec::handler(render_list)
                .transform_newlines(false)
                .strip()
                .swallow_trailing_newline(),
        );
        // [*] keeps newlines so nested [code] blocks survive
        tags.register(
            "*",
            TagSpec::handler(render_list_item)
                .newline_closes()
                .transform_newlines(false)
                .same_tag_closes()
                .strip(),
        );
        tags.register(
            "quote",
            TagSpec::template("<blockquote>{value}</blockquote>")
                .strip()
                .swallow_trailing_newline(),
        );
        tags.register(
            "center",
            TagSpec::template(r#"<div style="text-align:center;">{value}</div>"#),
        );
        tags.register("color", TagSpec::handler(render_color));
        tags.register(
            "url",
            TagSpec::handler(render_url)
                .replace_links(false)
                .replace_cosmetic(false),
        );

        tags.register("code", TagSpec::template(CODE_TEMPLATE));
        tags.register("eicon", TagSpec::template(EICON_TEMPLATE));
        tags.register("icon", TagSpec::handler(render_icon));
        tags.register("collapse", TagSpec::handler(render_collapse));
        tags.register("heading", TagSpec::handler(render_heading));

        tags
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Substitute `{key}` placeholders using `lookup`; unresolved ones stay as written.
pub(crate) fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let placeholder = &after[..close];
                match lookup(placeholder) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(placeholder);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Fill a tag template from the call's value and options
pub fn fill_template(template: &str, call: &TagCall<'_>) -> String {
    fill(template, |placeholder| {
        let (key, filter) = match placeholder.split_once('|') {
            Some((key, filter)) => (key, Some(filter)),
            None => (placeholder, None),
        };
        let raw = if key == "value" {
            call.value
        } else {
            call.options.get(key)?
        };
        match filter {
            None => Some(raw.to_string()),
            Some("slug") => Some(slug(raw)),
            Some(_) => None,
        }
    })
}

/// Lower-case and percent-escape a value for use in a URL path
pub fn slug(value: &str) -> String {
    utf8_percent_encode(&value.to_lowercase(), SLUG_SAFE).to_string()
}

/// Render an anchor through a `{href}`/`{text}` template
pub(crate) fn render_link(template: &str, href: &str, text: &str) -> String {
    let href = href.replace('"', "%22");
    fill(template, |key| match key {
        "href" => Some(href.clone()),
        "text" => Some(text.to_string()),
        _ => None,
    })
}

fn render_icon(call: &TagCall<'_>) -> Result<String> {
    Ok(fill_template(AVATAR_TEMPLATE, call))
}

fn render_collapse(call: &TagCall<'_>) -> Result<String> {
    let title = call
        .options
        .get("collapse")
        .unwrap_or(DEFAULT_COLLAPSE_TITLE);

    Ok(format!(
        "<details>\n<summary>{}</summary>\n\n{}\n</details>",
        escape_html(title),
        call.value
    ))
}

fn render_heading(call: &TagCall<'_>) -> Result<String> {
    let raw = call.options.get("level").unwrap_or(DEFAULT_HEADING_LEVEL);
    let level = parse_heading_level(call.name, raw)?;

    Ok(format!("<h{level}>{}</h{level}>", call.value))
}

fn parse_heading_level(tag: &str, raw: &str) -> Result<u8> {
    let invalid = |reason: String| Error::Format {
        tag: tag.to_string(),
        option: "level".to_string(),
        value: raw.to_string(),
        reason,
    };

    let level: u8 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if !(1..=6).contains(&level) {
        return Err(invalid("heading levels run from 1 to 6".to_string()));
    }
    Ok(level)
}

fn render_color(call: &TagCall<'_>) -> Result<String> {
    let requested = match call.options.get("color").or_else(|| call.options.first_key()) {
        Some(color) => color.trim(),
        None => return Ok(call.value.to_string()),
    };
    let color = COLOR_VALUE
        .find(requested)
        .map(|m| m.as_str())
        .unwrap_or("inherit");

    Ok(format!(
        r#"<span style="color:{color};">{}</span>"#,
        call.value
    ))
}

fn render_url(call: &TagCall<'_>) -> Result<String> {
    // Option values are not escaped by the parser
    let href = match call.options.get("url") {
        Some(url) => escape_html(url),
        None => call.value.to_string(),
    };

    let scheme: String = href
        .split(':')
        .next()
        .unwrap_or_default()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '+')
        .collect();
    if matches!(scheme.as_str(), "javascript" | "data" | "vbscript") {
        tracing::debug!(%href, "dropping link with script-capable scheme");
        return Ok(String::new());
    }

    let href = if !href.contains("://") && looks_like_domain(&href) {
        format!("http://{href}")
    } else {
        href
    };

    Ok(render_link(&call.settings.url_template, &href, call.value))
}

fn render_list(call: &TagCall<'_>) -> Result<String> {
    let list_type = call.options.get("list").unwrap_or("*");
    let style = match list_type {
        "1" => Some("decimal"),
        "01" => Some("decimal-leading-zero"),
        "a" => Some("lower-alpha"),
        "A" => Some("upper-alpha"),
        "i" => Some("lower-roman"),
        "I" => Some("upper-roman"),
        _ => None,
    };

    Ok(match style {
        Some(style) => format!(
            r#"<ol style="list-style-type:{style};">{}</ol>"#,
            call.value
        ),
        None => format!("<ul>{}</ul>", call.value),
    })
}

fn render_list_item(call: &TagCall<'_>) -> Result<String> {
    if call.parent != Some("list") {
        return Ok(format!("[*]{}<br />", call.value));
    }
    Ok(format!("<li>{}</li>", call.value))
}

/// Bare domain check used to decide whether a scheme-less href gets `http://`
pub(crate) fn looks_like_domain(candidate: &str) -> bool {
    if !(4..=255).contains(&candidate.len()) {
        return false;
    }

    let labels: Vec<&str> = candidate.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }

    let tld_ok = (2..=63).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic());
    tld_ok && rest.iter().all(|label| is_domain_label(label))
}

fn is_domain_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
