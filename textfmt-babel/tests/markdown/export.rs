//! Export tests for Markdown (HTML → Markdown)

use insta::assert_snapshot;
use textfmt_babel::formats::markdown::MarkdownFormat;
use textfmt_babel::{Format, FormatRegistry, HeadingStyle, MarkdownOptions, NewlineStyle};

fn export(html: &str) -> String {
    FormatRegistry::default().serialize(html, "markdown").unwrap()
}

#[test]
fn test_from_bbcode_html() {
    assert_snapshot!(export("<strong>text</strong><br>"), @"**text**");
}

#[test]
fn test_text_escapes() {
    assert_eq!(export("<p>snake_case and 2*3</p>"), r"snake\_case and 2\*3");
}

#[test]
fn test_demo_document() {
    let html = concat!(
        r#"Heres a link <a href="https://google.com">https://google.com</a><br><br>"#,
        "also some <strong>text</strong> on another line<br><br>",
        "<details>\n<summary>Title</summary>\n\nBody\n</details><br>",
    );
    assert_eq!(
        export(html),
        "Heres a link [https://google.com](https://google.com)  \n\nalso some **text** on another line  \n\nTitle\n\nBody"
    );
}

#[test]
fn test_nested_lists_and_quotes() {
    let html = "<ul>\n<li>one\n<ol>\n<li>two</li>\n</ol>\n</li>\n</ul>\n<blockquote>\n<p>said</p>\n</blockquote>\n";
    assert_eq!(export(html), "* one\n    1. two\n\n> said");
}

#[test]
fn test_configured_styles() {
    let format = MarkdownFormat::new(MarkdownOptions {
        heading_style: HeadingStyle::Setext,
        newline_style: NewlineStyle::Backslash,
        bullets: "-".to_string(),
        escape_special: false,
    });
    assert_eq!(
        format
            .serialize("<h2>Sub</h2><p>a_b<br>c</p><ul><li>x</li></ul>")
            .unwrap(),
        "Sub\n---\n\na_b\\\nc\n\n- x"
    );
}
