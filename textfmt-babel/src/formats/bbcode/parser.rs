//! BBCode parsing (BBCode → HTML)
//!
//! Pipeline: preprocess rules → tokens → rendered HTML
//!
//! Tokenizing is a linear scan for `[`. Each candidate tag is measured with
//! [`tag_extent`], which tracks quotes opened after `=` so that brackets inside
//! quoted option values do not end the tag. Candidates that are malformed or
//! not registered stay in the output as literal text.
//!
//! Rendering walks the token list once. An opening tag collects the tokens up
//! to its closing token (see `find_closing_token`), renders them recursively
//! (or as plain text for tags that do not render embedded markup) and hands the
//! result to the tag's rule. Closing tags that match nothing are dropped;
//! opening tags that are never closed extend to the end of the input. Tags
//! nested deeper than [`MAX_NESTING`] are kept as literal text.

use super::tags::{render_link, TagCall, TagOptions, TagRegistry, TagSpec};
use super::BbcodeOptions;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;

/// Bare URLs auto-linked in text content
static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?im)(\b(?:(?:https?|ftp|file)://|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)(?:[^\s()<>]+|\(([^\s()<>]+|(\([^\s()<>]+\)))*\))+(?:\(([^\s()<>]+|(\([^\s()<>]+\)))*\)|[^\s`!()\[\]{};:'".,<>?]))"#,
    )
    .expect("BARE_URL: hardcoded regex is valid")
});

/// Deepest tag nesting rendered as markup; deeper tags stay literal text
pub const MAX_NESTING: usize = 64;

const ESCAPES: &[(&str, &str)] = &[
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&#39;"),
];

const COSMETICS: &[(&str, &str)] = &[
    ("---", "&mdash;"),
    ("--", "&ndash;"),
    ("...", "&#8230;"),
    ("(c)", "&copy;"),
    ("(reg)", "&reg;"),
    ("(tm)", "&trade;"),
];

/// One lexical unit of BBCode input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    TagStart {
        name: String,
        options: TagOptions,
        raw: String,
    },
    TagEnd {
        name: String,
        raw: String,
    },
    Newline,
    Data(String),
}

impl Token {
    /// The source text this token was read from
    pub fn text(&self) -> &str {
        match self {
            Token::TagStart { raw, .. } | Token::TagEnd { raw, .. } => raw,
            Token::Newline => "\n",
            Token::Data(text) => text,
        }
    }
}

/// Where a tag candidate starting at `[` ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extent {
    /// `]` found; the tag spans up to this (exclusive) byte offset
    Closed(usize),
    /// Another `[` began before the tag closed
    Interrupted(usize),
    /// Input ended first; `quoted` is set when an open quote swallowed it
    Unterminated { quoted: bool },
}

/// A parsed tag candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedTag {
    pub name: String,
    pub closer: bool,
    pub options: TagOptions,
}

/// BBCode → HTML renderer over a tag registry
#[derive(Debug, Clone)]
pub struct BbcodeParser {
    tags: TagRegistry,
    options: BbcodeOptions,
}

impl BbcodeParser {
    /// Parser with the default tags and options
    pub fn new() -> Self {
        Self::with_options(BbcodeOptions::default())
    }

    pub fn with_options(options: BbcodeOptions) -> Self {
        BbcodeParser {
            tags: TagRegistry::with_defaults(),
            options,
        }
    }

    pub fn with_tags(tags: TagRegistry, options: BbcodeOptions) -> Self {
        BbcodeParser { tags, options }
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn options(&self) -> &BbcodeOptions {
        &self.options
    }

    /// Render BBCode source to HTML
    pub fn format(&self, source: &str) -> Result<String> {
        let marked = mark_rules(source, self.options.hr_min_run);
        let tokens = self.tokenize(&marked);
        tracing::trace!(tokens = tokens.len(), "rendering bbcode");
        let html = self.render_tokens(&tokens, None, 0)?;
        Ok(html.replace('\r', &self.options.newline))
    }

    /// Split source into tokens, keeping unknown or malformed tags as text
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let data = source.replace("\r\n", "\n").replace('\r', "\n");
        let mut tokens = Vec::new();
        let mut pos = 0;

        while let Some(offset) = data[pos..].find('[') {
            let start = pos + offset;
            if start > pos {
                push_text(&mut tokens, &data[pos..start]);
            }

            let end = match tag_extent(&data, start) {
                Extent::Closed(end) => {
                    let raw = &data[start..end];
                    self.push_tag(&mut tokens, raw);
                    end
                }
                Extent::Interrupted(end) => {
                    push_text(&mut tokens, &data[start..end]);
                    end
                }
                Extent::Unterminated { quoted } => {
                    if quoted {
                        tracing::warn!(
                            tag = %first_line(&data[start..]),
                            "MalformedTagWarning: unterminated quote in tag, keeping the rest of the input as text"
                        );
                    }
                    push_text(&mut tokens, &data[start..]);
                    data.len()
                }
            };
            pos = end;
        }

        if pos < data.len() {
            push_text(&mut tokens, &data[pos..]);
        }
        tokens
    }

    fn push_tag(&self, tokens: &mut Vec<Token>, raw: &str) {
        let parsed = match parse_tag(raw) {
            Some(parsed) => parsed,
            None => return push_text(tokens, raw),
        };

        if !self.tags.has(&parsed.name) {
            if self.options.drop_unrecognized {
                tracing::debug!(tag = %parsed.name, "dropping unrecognized tag");
            } else {
                tracing::debug!(tag = %parsed.name, "unrecognized tag kept as text");
                push_text(tokens, raw);
            }
            return;
        }

        let raw = raw.to_string();
        tokens.push(if parsed.closer {
            Token::TagEnd {
                name: parsed.name,
                raw,
            }
        } else {
            Token::TagStart {
                name: parsed.name,
                options: parsed.options,
                raw,
            }
        });
    }

    fn render_tokens(
        &self,
        tokens: &[Token],
        parent: Option<(&str, &TagSpec)>,
        depth: usize,
    ) -> Result<String> {
        let mut out = String::new();
        let mut idx = 0;

        while idx < tokens.len() {
            match &tokens[idx] {
                Token::TagStart { raw, .. } | Token::TagEnd { raw, .. } if depth >= MAX_NESTING => {
                    out.push_str(&self.render_text(raw, parent));
                }
                Token::TagStart { name, options, .. } => {
                    let Some(spec) = self.tags.resolve(name) else {
                        idx += 1;
                        continue;
                    };
                    let parent_name = parent.map(|(name, _)| name);

                    if spec.standalone {
                        out.push_str(&self.render_tag(spec, name, "", options, parent_name)?);
                        idx += 1;
                        continue;
                    }

                    let (mut end, consume) = self.find_closing_token(name, spec, tokens, idx + 1);
                    let inner_tokens = &tokens[idx + 1..end];
                    if !consume {
                        end -= 1;
                    }

                    let mut inner = if spec.render_embedded {
                        self.render_tokens(inner_tokens, Some((name.as_str(), spec)), depth + 1)?
                    } else {
                        let text: String = inner_tokens.iter().map(Token::text).collect();
                        self.transform(
                            &text,
                            spec.escape_html,
                            spec.replace_links,
                            spec.replace_cosmetic,
                            spec.transform_newlines,
                        )
                    };
                    if spec.strip {
                        inner = inner.trim().to_string();
                    }
                    if spec.transform_newlines {
                        inner = inner.replace('\n', &self.options.newline);
                    }

                    out.push_str(&self.render_tag(spec, name, &inner, options, parent_name)?);

                    if spec.swallow_trailing_newline
                        && matches!(tokens.get(end + 1), Some(Token::Newline))
                    {
                        end += 1;
                    }
                    idx = end;
                }
                Token::Newline => match parent {
                    None => out.push_str(&self.options.newline),
                    Some(_) => out.push('\n'),
                },
                Token::Data(text) => out.push_str(&self.render_text(text, parent)),
                Token::TagEnd { .. } => {}
            }
            idx += 1;
        }

        Ok(out)
    }

    /// Text content under `parent`, with the parser's flags narrowed by the parent's
    fn render_text(&self, text: &str, parent: Option<(&str, &TagSpec)>) -> String {
        let flag = |parser: bool, tag: fn(&TagSpec) -> bool| {
            parser && parent.map_or(true, |(_, spec)| tag(spec))
        };
        self.transform(
            text,
            flag(self.options.escape_html, |s: &TagSpec| s.escape_html),
            flag(self.options.replace_links, |s: &TagSpec| s.replace_links),
            flag(self.options.replace_cosmetic, |s: &TagSpec| s.replace_cosmetic),
            false,
        )
    }

    fn render_tag(
        &self,
        spec: &TagSpec,
        name: &str,
        value: &str,
        options: &TagOptions,
        parent: Option<&str>,
    ) -> Result<String> {
        spec.render(&TagCall {
            name,
            value,
            options,
            parent,
            settings: &self.options,
        })
    }

    /// Index of the token that ends `name`, and whether that token belongs to it.
    ///
    /// Unclosed tags run to the end of `tokens`.
    fn find_closing_token(
        &self,
        name: &str,
        spec: &TagSpec,
        tokens: &[Token],
        from: usize,
    ) -> (usize, bool) {
        let mut embed_count = 0usize;
        let mut block_count = 0isize;

        for (pos, token) in tokens.iter().enumerate().skip(from) {
            let (token_name, opening) = match token {
                Token::Data(_) => continue,
                Token::Newline => {
                    if spec.newline_closes && block_count == 0 {
                        return (pos, true);
                    }
                    continue;
                }
                Token::TagStart { name, .. } => (name.as_str(), true),
                Token::TagEnd { name, .. } => (name.as_str(), false),
            };

            // Blocks that keep their newlines (code inside a list item) do
            // not end a newline-closed tag.
            if spec.newline_closes {
                let keeps_newlines = self
                    .tags
                    .resolve(token_name)
                    .is_some_and(|inner| !inner.transform_newlines);
                if keeps_newlines {
                    block_count += if opening { 1 } else { -1 };
                }
            }

            if token_name != name {
                continue;
            }
            if opening {
                if spec.same_tag_closes {
                    return (pos, false);
                }
                if spec.render_embedded {
                    embed_count += 1;
                }
            } else if embed_count > 0 {
                embed_count -= 1;
            } else {
                return (pos, true);
            }
        }

        (tokens.len(), true)
    }

    /// Escape, auto-link and prettify a run of text
    fn transform(
        &self,
        text: &str,
        escape_html: bool,
        replace_links: bool,
        replace_cosmetic: bool,
        transform_newlines: bool,
    ) -> String {
        let prettify = |segment: &str| {
            let mut segment = segment.to_string();
            if escape_html {
                segment = replace_all(&segment, ESCAPES);
            }
            if replace_cosmetic {
                segment = replace_all(&segment, COSMETICS);
            }
            segment
        };

        let mut out = String::with_capacity(text.len());
        if self.options.replace_links && replace_links {
            let mut last = 0;
            for url in BARE_URL.find_iter(text) {
                out.push_str(&prettify(&text[last..url.start()]));
                out.push_str(&self.link(url.as_str()));
                last = url.end();
            }
            out.push_str(&prettify(&text[last..]));
        } else {
            out.push_str(&prettify(text));
        }

        if transform_newlines {
            out = out.replace('\n', "\r");
        }
        out
    }

    fn link(&self, url: &str) -> String {
        let href = if url.contains("://") {
            url.to_string()
        } else {
            format!("http://{url}")
        };
        render_link(&self.options.url_template, &href, url)
    }
}

impl Default for BbcodeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every line made of one repeated character with an `[hr]` tag.
///
/// Every line, replaced or not, is re-emitted with a trailing `\n`.
pub fn mark_rules(source: &str, min_run: usize) -> String {
    let normalized = source.replace("\r\n", "\n");
    let mut out = String::with_capacity(normalized.len() + 1);
    for line in normalized.split('\n') {
        if is_rule_line(line, min_run) {
            out.push_str("[hr]\n");
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn is_rule_line(line: &str, min_run: usize) -> bool {
    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    line.chars().count() >= min_run && chars.all(|c| c == first)
}

/// Measure the tag candidate opening at `start` (which must be a `[`)
pub(crate) fn tag_extent(data: &str, start: usize) -> Extent {
    let mut in_quote: Option<u8> = None;
    let mut quotable = false;

    for (i, &ch) in data.as_bytes().iter().enumerate().skip(start + 1) {
        if ch == b'=' {
            quotable = true;
        }
        if ch == b'"' || ch == b'\'' {
            match in_quote {
                None if quotable => in_quote = Some(ch),
                Some(q) if q == ch => {
                    in_quote = None;
                    quotable = false;
                }
                _ => {}
            }
        }
        if in_quote.is_none() {
            if ch == b'[' {
                return Extent::Interrupted(i);
            }
            if ch == b']' {
                return Extent::Closed(i + 1);
            }
        }
    }

    Extent::Unterminated {
        quoted: in_quote.is_some(),
    }
}

/// Parse a complete `[...]` candidate; `None` means it is not a tag
pub(crate) fn parse_tag(raw: &str) -> Option<ParsedTag> {
    if !raw.starts_with('[') || !raw.ends_with(']') || raw.len() < 2 {
        return None;
    }
    if raw.contains('\n') || raw.contains('\r') {
        return None;
    }

    let inner = raw[1..raw.len() - 1].trim();
    if inner.is_empty() {
        return None;
    }

    let (inner, closer) = match inner.strip_prefix('/') {
        Some(rest) => (rest, true),
        None => (inner, false),
    };

    let (name, options) = if !closer && (inner.contains('=') || inner.contains(' ')) {
        parse_options(inner)
    } else {
        (inner.to_string(), TagOptions::new())
    };

    Some(ParsedTag {
        name: name.trim().to_lowercase(),
        closer,
        options,
    })
}

/// Parse the inside of an opening tag into its name and options.
///
/// The grammar is deliberately loose: `name=value` makes `name` both the tag
/// name and an option, further `key=value` pairs follow, and a bare word is an
/// option with an empty value. Quotes are only recognised inside values; in a
/// quoted value `\\`, `\"` and `\'` are escapes. An unquoted value may contain
/// spaces as long as no further `=` follows.
pub(crate) fn parse_options(data: &str) -> (String, TagOptions) {
    let mut name: Option<String> = None;
    let mut options = TagOptions::new();
    let mut in_value = false;
    let mut in_quote: Option<char> = None;
    let mut attr_done = false;
    let mut attr = String::new();
    let mut value = String::new();

    let stripped = data.trim();
    let chars: Vec<(usize, char)> = stripped.char_indices().collect();
    let mut pos = 0;

    while pos < chars.len() {
        let (offset, ch) = chars[pos];
        if in_value {
            if let Some(quote) = in_quote {
                let escaped = chars
                    .get(pos + 1)
                    .map(|&(_, next)| next)
                    .filter(|next| matches!(*next, '\\' | '"' | '\''));
                match escaped {
                    Some(next) if ch == '\\' => {
                        value.push(next);
                        pos += 1;
                    }
                    _ if ch == quote => {
                        in_quote = None;
                        in_value = false;
                        if !attr.is_empty() {
                            options.insert(attr.to_lowercase(), value.trim());
                        }
                        attr.clear();
                        value.clear();
                    }
                    _ => value.push(ch),
                }
            } else if ch == '"' || ch == '\'' {
                in_quote = Some(ch);
            } else if ch == ' ' && stripped[offset + 1..].contains('=') {
                options.insert(attr.to_lowercase(), value.trim());
                attr.clear();
                value.clear();
                in_value = false;
            } else {
                value.push(ch);
            }
        } else if ch == '=' {
            in_value = true;
            if name.is_none() {
                name = Some(attr.clone());
            }
        } else if ch == ' ' {
            attr_done = true;
        } else if attr_done {
            if !attr.is_empty() {
                if name.is_none() {
                    name = Some(attr.clone());
                } else {
                    options.insert(attr.to_lowercase(), "");
                }
            }
            attr.clear();
            attr.push(ch);
            attr_done = false;
        } else {
            attr.push(ch);
        }
        pos += 1;
    }

    if !attr.is_empty() {
        if name.is_none() {
            name = Some(attr.clone());
        }
        options.insert(attr.to_lowercase(), value.trim());
    }

    (name.unwrap_or_default().to_lowercase(), options)
}

/// HTML-escape `& < > " '`
pub fn escape_html(text: &str) -> String {
    replace_all(text, ESCAPES)
}

fn replace_all(text: &str, pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    let mut parts = text.split('\n').peekable();
    while let Some(part) = parts.next() {
        if !part.is_empty() {
            tokens.push(Token::Data(part.to_string()));
        }
        if parts.peek().is_some() {
            tokens.push(Token::Newline);
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
