//! Facade tests: constructors, accessors and the overview

use textfmt_babel::{
    ConvertOptions, Document, DocumentOptions, Error, FormatRegistry, MarkdownOptions,
    NewlineStyle, SUPPORTED_IN_FORMATS, SUPPORTED_OUT_FORMATS,
};

#[test]
fn test_bbcode_outputs() {
    let doc = Document::from_bbcode("[b]text[/b]", DocumentOptions::default()).unwrap();

    assert_eq!(doc.to_html().unwrap(), "<strong>text</strong><br>");
    assert_eq!(doc.to_plaintext().unwrap(), "text");
    assert_eq!(doc.to_bbcode().unwrap(), "[b]text[/b]<br>");
    assert_eq!(doc.to_markdown().unwrap(), "**text**");
    assert_eq!(doc.to_cf().unwrap(), "'''text'''");
    assert_eq!(doc.to_discord_markdown().unwrap(), "**text**");
}

#[test]
fn test_every_input_reaches_every_output() {
    let sources = [
        ("bbcode", "[b]x[/b]"),
        ("cf", "'''x'''"),
        ("html", "<p><strong>x</strong></p>"),
        ("markdown", "**x**"),
    ];
    for (format, source) in sources {
        assert!(SUPPORTED_IN_FORMATS.contains(&format));
        let doc = Document::from_format(format, source, DocumentOptions::default()).unwrap();
        for output in SUPPORTED_OUT_FORMATS {
            let rendered = doc.to_format(output).unwrap();
            assert!(rendered.contains('x'), "{format} → {output}: {rendered:?}");
        }
    }
}

#[test]
fn test_outputs_are_recomputed() {
    let mut doc = Document::from_html("<p>one</p>", DocumentOptions::default()).unwrap();
    assert_eq!(doc.to_plaintext().unwrap(), "one");

    doc.set_html("<p>two</p>").unwrap();
    assert_eq!(doc.to_plaintext().unwrap(), "two");
    assert_eq!(doc.to_markdown().unwrap(), "two");
}

#[test]
fn test_render_all() {
    let doc = Document::from_markdown("*hi*", DocumentOptions::default()).unwrap();
    let overview = doc.render_all().unwrap();

    assert_eq!(
        overview,
        vec![
            ("html", "<p><em>hi</em></p>\n".to_string()),
            ("plaintext", "hi".to_string()),
            ("bbcode", "[i]hi[/i]".to_string()),
            ("markdown", "*hi*".to_string()),
            ("cf", "''hi''".to_string()),
            ("discord", "*hi*".to_string()),
        ]
    );
}

#[test]
fn test_heading_error_surfaces_from_constructor() {
    let result = Document::from_bbcode("[heading level=big]x[/heading]", DocumentOptions::default());
    assert!(matches!(result, Err(Error::Format { .. })));
}

#[test]
fn test_configured_registry() {
    let registry = FormatRegistry::with_options(&ConvertOptions {
        markdown: MarkdownOptions {
            newline_style: NewlineStyle::Backslash,
            ..MarkdownOptions::default()
        },
        ..ConvertOptions::default()
    });
    let doc = Document::parse_with(&registry, "bbcode", "a\nb", DocumentOptions::default()).unwrap();
    assert_eq!(doc.to_markdown().unwrap(), "a\\\nb");
}

#[test]
fn test_soft_break_keeps_words_apart() {
    let doc = Document::from_markdown("**a**\n*b*", DocumentOptions::default()).unwrap();
    assert_eq!(doc.to_markdown().unwrap(), "**a** *b*");
    assert_eq!(doc.to_discord_markdown().unwrap(), "**a** *b*");
}

#[test]
fn test_deeply_nested_input_degrades_to_text() {
    let source = format!("{}x", "[b]".repeat(10_000));
    let doc = Document::from_bbcode(&source, DocumentOptions::default()).unwrap();
    for output in SUPPORTED_OUT_FORMATS {
        assert!(doc.to_format(output).unwrap().contains('x'), "{output}");
    }

    let html = format!("{}x", "<i>".repeat(10_000));
    let doc = Document::from_html(&html, DocumentOptions::default()).unwrap();
    assert_eq!(doc.to_plaintext().unwrap(), "x");
    assert!(doc.to_cf().unwrap().contains('x'));
}
