//! Markdown serialization (HTML → Markdown)
//!
//! Walks the `html5ever` tree of the canonical HTML and writes Markdown
//! element by element. Block elements emit their content surrounded by blank
//! lines and the final text is normalized: runs of blank lines collapse to one
//! and the result is trimmed.
//!
//! Bold and italic go through an [`Emphasis`] strategy so the same walker
//! produces both standard Markdown and the cf dialect (`'''bold'''`,
//! `''italic''`).

use super::{HeadingStyle, MarkdownOptions, NewlineStyle};
use crate::common::dom::{
    attr, element_name, is_formatting_whitespace, is_text, parse_html, text_content,
};
use markup5ever_rcdom::{Handle, NodeData};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE: hardcoded regex is valid"));
static LONE_TRAILING_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)([^ \n]) $").expect("LONE_TRAILING_SPACE: hardcoded regex is valid")
});
static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]+$").expect("BLANK_LINE: hardcoded regex is valid"));
static BLANK_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("BLANK_RUNS: hardcoded regex is valid"));
// Hard breaks with nothing after them
static TRAILING_BREAKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\\\n\s*)+\z").expect("TRAILING_BREAKS: hardcoded regex is valid")
});

const CONTINUATION_INDENT: &str = "    ";

/// Deepest element nesting converted as markup; deeper subtrees become their text
pub const MAX_DEPTH: usize = 96;

/// Elements whose boundaries are line breaks in the output
const BLOCK_ELEMENTS: &[&str] = &[
    "html", "head", "body", "p", "div", "details", "summary", "section", "article", "header",
    "footer", "main", "aside", "nav", "figure", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol",
    "li", "blockquote", "pre", "hr", "table", "thead", "tbody", "tr", "td", "th",
];

/// Elements dropped together with their content
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "head", "title"];

/// How bold and italic are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// `**bold**`, `*italic*`; surrounding spaces move outside the markers
    Standard,
    /// `'''bold'''`, `''italic''`; content kept verbatim
    Cf,
}

impl Emphasis {
    fn strong(self, text: &str) -> String {
        match self {
            Emphasis::Standard => wrap_chomped(text, "**"),
            Emphasis::Cf => format!("'''{text}'''"),
        }
    }

    fn em(self, text: &str) -> String {
        match self {
            Emphasis::Standard => wrap_chomped(text, "*"),
            Emphasis::Cf => format!("''{text}''"),
        }
    }
}

/// Where in the tree the walker currently is
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// Inside a heading: block markup collapses to inline text
    inline: bool,
    /// Inside code: no escaping, no emphasis markers
    code: bool,
    /// Inside `pre`: whitespace kept as is
    pre: bool,
    /// Number of enclosing `ul` elements
    bullet_depth: usize,
    /// Inside a list item
    in_item: bool,
    /// Number of enclosing elements
    depth: usize,
}

/// HTML → Markdown converter
#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    options: MarkdownOptions,
    emphasis: Emphasis,
}

impl MarkdownConverter {
    pub fn new(options: MarkdownOptions, emphasis: Emphasis) -> Self {
        MarkdownConverter { options, emphasis }
    }

    /// Standard Markdown output
    pub fn standard(options: MarkdownOptions) -> Self {
        Self::new(options, Emphasis::Standard)
    }

    /// cf dialect output
    pub fn cf(options: MarkdownOptions) -> Self {
        Self::new(options, Emphasis::Cf)
    }

    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    /// Convert an HTML string to Markdown
    pub fn convert(&self, html: &str) -> String {
        let dom = parse_html(html);
        let raw = self.node(&dom.document, Context::default());
        normalize(&raw)
    }

    fn node(&self, handle: &Handle, ctx: Context) -> String {
        match &handle.data {
            NodeData::Document => self.children(handle, ctx),
            NodeData::Text { contents } => self.text(&contents.borrow(), ctx),
            NodeData::Element { name, .. } if HIDDEN_ELEMENTS.contains(&&*name.local) => {
                String::new()
            }
            NodeData::Element { .. } if ctx.depth >= MAX_DEPTH => {
                self.text(&text_content(handle, HIDDEN_ELEMENTS), ctx)
            }
            NodeData::Element { name, .. } => self.element(
                handle,
                &name.local,
                Context {
                    depth: ctx.depth + 1,
                    ..ctx
                },
            ),
            _ => String::new(),
        }
    }

    fn children(&self, handle: &Handle, ctx: Context) -> String {
        let mut out = String::new();
        let children = handle.children.borrow();
        for (index, child) in children.iter().enumerate() {
            if !ctx.pre && is_formatting_whitespace(child) {
                // A line break between inline content is a word gap
                let between_inline = index > 0
                    && index + 1 < children.len()
                    && !is_block(&children[index - 1])
                    && !is_block(&children[index + 1]);
                if between_inline && !out.is_empty() && !out.ends_with(char::is_whitespace) {
                    out.push(' ');
                }
                continue;
            }

            let piece = self.node(child, ctx);
            // Text never starts a line with the space left by collapsed whitespace
            if is_text(child) && !ctx.pre && out.ends_with('\n') {
                out.push_str(piece.trim_start());
            } else {
                out.push_str(&piece);
            }
        }
        out
    }

    fn text(&self, raw: &str, ctx: Context) -> String {
        if ctx.pre {
            return raw.to_string();
        }

        let collapsed = WHITESPACE.replace_all(raw, " ");
        if ctx.code || !self.options.escape_special {
            return collapsed.into_owned();
        }
        collapsed.replace('*', r"\*").replace('_', r"\_")
    }

    fn element(&self, handle: &Handle, tag: &str, ctx: Context) -> String {
        if let Some(level) = heading_level(tag) {
            return self.heading(handle, level, ctx);
        }

        match tag {
            "a" => self.anchor(handle, ctx),
            "b" | "strong" => {
                let inner = self.children(handle, ctx);
                if ctx.code && self.emphasis == Emphasis::Standard {
                    return inner;
                }
                self.emphasis.strong(&inner)
            }
            "i" | "em" => {
                let inner = self.children(handle, ctx);
                if ctx.code && self.emphasis == Emphasis::Standard {
                    return inner;
                }
                self.emphasis.em(&inner)
            }
            "s" | "del" | "strike" => {
                let inner = self.children(handle, ctx);
                if ctx.code {
                    return inner;
                }
                wrap_chomped(&inner, "~~")
            }
            "code" | "kbd" | "samp" => self.inline_code(handle, ctx),
            "pre" => self.code_block(handle, ctx),
            "p" | "div" | "details" | "summary" | "section" | "article" | "header" | "footer"
            | "main" | "aside" | "nav" | "figure" => self.block(handle, ctx),
            "br" => self.line_break(ctx),
            "ul" => self.list(handle, false, ctx),
            "ol" => self.list(handle, true, ctx),
            "blockquote" => self.blockquote(handle, ctx),
            "img" => self.image(handle, ctx),
            "hr" => "\n\n---\n\n".to_string(),
            _ => self.children(handle, ctx),
        }
    }

    fn anchor(&self, handle: &Handle, ctx: Context) -> String {
        let inner = self.children(handle, ctx);
        let (prefix, text, suffix) = chomp(&inner);
        if text.is_empty() {
            return String::new();
        }

        let href = attr(handle, "href").unwrap_or_default();
        if href.is_empty() {
            return format!("{prefix}{text}{suffix}");
        }
        format!(
            "{prefix}[{text}]({href}{}){suffix}",
            title_part(handle)
        )
    }

    fn inline_code(&self, handle: &Handle, ctx: Context) -> String {
        let inner = self.children(
            handle,
            Context {
                code: true,
                ..ctx
            },
        );
        if ctx.pre {
            return inner;
        }

        let (prefix, text, suffix) = chomp(&inner);
        if text.is_empty() {
            return String::new();
        }
        format!("{prefix}`{text}`{suffix}")
    }

    fn code_block(&self, handle: &Handle, ctx: Context) -> String {
        let language = handle
            .children
            .borrow()
            .iter()
            .find(|child| element_name(child) == Some("code"))
            .and_then(|code| attr(code, "class"))
            .and_then(|class| {
                class
                    .split_whitespace()
                    .find_map(|c| c.strip_prefix("language-").map(str::to_string))
            })
            .unwrap_or_default();

        let code = self.children(
            handle,
            Context {
                code: true,
                pre: true,
                ..ctx
            },
        );
        format!(
            "\n\n```{language}\n{}\n```\n\n",
            code.trim_end_matches('\n')
        )
    }

    fn heading(&self, handle: &Handle, level: usize, ctx: Context) -> String {
        let inner = self.children(
            handle,
            Context {
                inline: true,
                ..ctx
            },
        );
        let text = inner.trim();
        if text.is_empty() {
            return String::new();
        }
        if ctx.inline {
            return text.to_string();
        }

        match self.options.heading_style {
            HeadingStyle::Setext if level <= 2 => {
                let underline = if level == 1 { "=" } else { "-" };
                format!(
                    "\n\n{text}\n{}\n\n",
                    underline.repeat(text.chars().count())
                )
            }
            _ => format!("\n\n{} {text}\n\n", "#".repeat(level)),
        }
    }

    fn block(&self, handle: &Handle, ctx: Context) -> String {
        let inner = self.children(handle, ctx);
        let text = inner.trim();
        if text.is_empty() {
            return String::new();
        }
        if ctx.inline {
            return format!(" {text} ");
        }
        format!("\n\n{text}\n\n")
    }

    fn line_break(&self, ctx: Context) -> String {
        if ctx.inline {
            return String::new();
        }
        match self.options.newline_style {
            NewlineStyle::Spaces => "  \n".to_string(),
            NewlineStyle::Backslash => "\\\n".to_string(),
        }
    }

    fn list(&self, handle: &Handle, ordered: bool, ctx: Context) -> String {
        let start = if ordered {
            attr(handle, "start")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(1)
        } else {
            1
        };
        let item_ctx = Context {
            bullet_depth: ctx.bullet_depth + usize::from(!ordered),
            in_item: true,
            ..ctx
        };

        let mut items = String::new();
        let items_iter = handle
            .children
            .borrow()
            .iter()
            .filter(|child| element_name(child) == Some("li"))
            .cloned()
            .collect::<Vec<_>>();
        for (index, item) in items_iter.iter().enumerate() {
            let bullet = if ordered {
                format!("{}.", start + index)
            } else {
                self.bullet(item_ctx.bullet_depth).to_string()
            };
            let body = self.children(item, item_ctx);
            items.push_str(&bullet);
            items.push(' ');
            items.push_str(&indent_continuation(body.trim()));
            items.push('\n');
        }

        let items = items.trim_end();
        if items.is_empty() {
            return String::new();
        }
        if ctx.in_item {
            return format!("\n{items}");
        }
        format!("\n\n{items}\n\n")
    }

    fn bullet(&self, depth: usize) -> char {
        let bullets: Vec<char> = self.options.bullets.chars().collect();
        if bullets.is_empty() {
            return '*';
        }
        bullets[depth.saturating_sub(1) % bullets.len()]
    }

    fn blockquote(&self, handle: &Handle, ctx: Context) -> String {
        let inner = self.children(handle, ctx);
        let text = inner.trim();
        if text.is_empty() {
            return String::new();
        }

        let quoted: Vec<String> = text
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    }

    fn image(&self, handle: &Handle, ctx: Context) -> String {
        let alt = attr(handle, "alt").unwrap_or_default();
        if ctx.inline {
            return alt;
        }
        let src = attr(handle, "src").unwrap_or_default();
        format!("![{alt}]({src}{})", title_part(handle))
    }
}

/// Convert HTML to standard Markdown with default options
pub fn serialize_to_markdown(html: &str) -> String {
    MarkdownConverter::standard(MarkdownOptions::default()).convert(html)
}

fn heading_level(tag: &str) -> Option<usize> {
    tag.strip_prefix('h')
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|level| (1..=6).contains(level))
}

fn title_part(handle: &Handle) -> String {
    match attr(handle, "title") {
        Some(title) if !title.is_empty() => format!(" \"{}\"", title.replace('"', "\\\"")),
        _ => String::new(),
    }
}

/// Split off one leading and one trailing space marker and trim the rest
fn chomp(text: &str) -> (&'static str, &str, &'static str) {
    let prefix = if text.starts_with(' ') { " " } else { "" };
    let suffix = if text.ends_with(' ') { " " } else { "" };
    (prefix, text.trim(), suffix)
}

fn wrap_chomped(text: &str, marker: &str) -> String {
    let (prefix, text, suffix) = chomp(text);
    if text.is_empty() {
        return String::new();
    }
    format!("{prefix}{marker}{text}{marker}{suffix}")
}

fn indent_continuation(body: &str) -> String {
    let mut lines = body.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(CONTINUATION_INDENT);
            out.push_str(line);
        }
    }
    out
}

fn is_block(handle: &Handle) -> bool {
    element_name(handle).is_some_and(|name| BLOCK_ELEMENTS.contains(&name))
}

fn normalize(raw: &str) -> String {
    let text = LONE_TRAILING_SPACE.replace_all(raw, "${1}");
    let text = BLANK_LINE.replace_all(&text, "");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    let text = TRAILING_BREAKS.replace(&text, "");
    text.trim().to_string()
}
