//! cf dialect tests

use insta::assert_snapshot;
use textfmt_babel::{Document, DocumentOptions};

fn cf_of_markdown(source: &str) -> String {
    Document::from_markdown(source, DocumentOptions::default())
        .unwrap()
        .to_cf()
        .unwrap()
}

#[test]
fn test_roundtrip_bold() {
    let doc = Document::from_cf("'''bold'''", DocumentOptions::default()).unwrap();
    assert_snapshot!(doc.to_cf().unwrap(), @"'''bold'''");
}

#[test]
fn test_roundtrip_mixed() {
    let doc = Document::from_cf("'''bold''' and ''italic''", DocumentOptions::default()).unwrap();
    assert_eq!(doc.to_cf().unwrap(), "'''bold''' and ''italic''");
    assert_eq!(doc.to_markdown().unwrap(), "**bold** and *italic*");
}

#[test]
fn test_link_with_display_text() {
    assert_eq!(
        cf_of_markdown("[Google](https://google.com)"),
        "Google ( https://google.com )"
    );
}

#[test]
fn test_link_equal_to_target() {
    assert_eq!(
        cf_of_markdown("[https://google.com](https://google.com)"),
        "https://google.com"
    );
}

#[test]
fn test_bare_link_from_bbcode() {
    let doc = Document::from_bbcode("Heres a link https://google.com", DocumentOptions::default())
        .unwrap();
    assert_eq!(doc.to_cf().unwrap(), "Heres a link https://google.com");
}

#[test]
fn test_escape_cleanup() {
    let doc = Document::from_html("<p>snake_case and 2*3</p>", DocumentOptions::default()).unwrap();
    assert_eq!(doc.to_cf().unwrap(), "snake_case and 23");
}

#[test]
fn test_soft_break_between_emphasis_spans() {
    let doc = Document::from_cf("'''a'''\n''b''", DocumentOptions::default()).unwrap();
    assert_eq!(doc.to_cf().unwrap(), "'''a''' ''b''");
    assert_eq!(doc.to_markdown().unwrap(), "**a** *b*");
}
