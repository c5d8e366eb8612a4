//! Rich text conversion between BBCode, Markdown, cf, Discord Markdown, plaintext and HTML
//!
//!     This crate converts user-authored markup between dialects. HTML is the canonical form:
//!     every input format is turned into HTML, and every output format is derived from that HTML
//!     on demand. Formats never talk to each other directly, so adding a dialect means writing
//!     one parser and/or one serializer against HTML.
//!
//!     TLDR: For format authors:
//!         - Implement the Format trait (./format.rs): a name, extensions, and parse/serialize.
//!         - Register it on a FormatRegistry. Registries are built once and then only read.
//!         - HTML parsing/traversal, Markdown compilation and sanitizing are delegated to crates
//!           (html5ever, comrak, ammonia); never hand-roll them.
//!
//!     This is a pure lib: no printing, no env vars, no files. The textfmt-cli crate is the shell.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry, default registry
//!     ├── document.rs             # Document facade (from_*/to_*)
//!     ├── sanitize.rs             # Sanitizer allow-list configuration
//!     ├── formats
//!     │   ├── bbcode              # Tag registry, tokenizer/renderer, HTML reducer
//!     │   ├── markdown            # comrak parsing, HTML → Markdown walker
//!     │   ├── cf                  # cf dialect on top of the Markdown walker
//!     │   ├── discord             # Discord output on top of the Markdown walker
//!     │   ├── html                # identity
//!     │   └── plaintext           # text extraction
//!     ├── common
//!     │   ├── dom.rs              # html5ever helpers
//!     │   └── links.rs            # inline link rewriting for chat dialects
//!     └── lib.rs
//!
//! Core Algorithms
//!
//!     BBCode → HTML is a small tag engine: tokenize against the tag registry, pair opening and
//!     closing tags, render inner content recursively, hand it to the tag's rule (a template or
//!     a handler function). See ./formats/bbcode/parser.rs.
//!
//!     HTML → BBCode is not the inverse. It is an ordered table of regex substitutions and is
//!     documented as best-effort (./formats/bbcode/serializer.rs).
//!
//!     HTML → Markdown walks the html5ever tree. Emphasis is a strategy (standard or cf) so one
//!     walker serves Markdown, cf and Discord; the chat dialects then rewrite inline links
//!     (./common/links.rs).
//!
//! Conversions are lossy
//!
//!     Every dialect knows things the others don't (custom BBCode tags, colours, collapsible
//!     blocks). Converting through HTML keeps what the target can express and drops the rest to
//!     text. Round tripping is only guaranteed for the identity (HTML → HTML).
//!
pub mod common;
pub mod document;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod sanitize;

pub use document::{Document, DocumentOptions, SUPPORTED_IN_FORMATS, SUPPORTED_OUT_FORMATS};
pub use error::{Error, Result};
pub use format::Format;
pub use formats::bbcode::{
    BbcodeOptions, BbcodeParser, TagCall, TagHandler, TagOptions, TagRegistry, TagRule, TagSpec,
};
pub use formats::markdown::{
    Emphasis, HeadingStyle, MarkdownConverter, MarkdownOptions, NewlineStyle,
};
pub use registry::{default_registry, ConvertOptions, FormatRegistry};
pub use sanitize::SanitizerConfig;
