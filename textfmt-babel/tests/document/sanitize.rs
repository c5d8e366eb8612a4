//! Sanitizing through the facade

use std::collections::BTreeMap;
use textfmt_babel::{Document, DocumentOptions, Error, SanitizerConfig};

#[test]
fn test_script_removed() {
    let doc = Document::from_html(
        "<p>hello<script>alert(1)</script></p>",
        DocumentOptions::safe(),
    )
    .unwrap();
    assert_eq!(doc.html(), "<p>hello</p>");
    assert_eq!(doc.to_plaintext().unwrap(), "hello");
}

#[test]
fn test_markdown_raw_html_sanitized() {
    let doc = Document::from_markdown(
        "hi <img src=x onerror=alert(1)>",
        DocumentOptions::safe(),
    )
    .unwrap();
    assert!(!doc.html().contains("onerror"));
}

#[test]
fn test_custom_tags_need_allowing() {
    let stripped = Document::from_bbcode("[eicon]wave[/eicon]", DocumentOptions::safe()).unwrap();
    assert!(stripped.html().contains("<img"));

    let options = DocumentOptions {
        safe_html: true,
        sanitizer: SanitizerConfig {
            tags: Some(vec!["strong".to_string()]),
            ..SanitizerConfig::default()
        },
    };
    let doc = Document::from_bbcode("[b]x[/b] [i]y[/i]", options).unwrap();
    assert_eq!(doc.html(), "<strong>x</strong> y");
}

#[test]
fn test_invalid_configurations_fail() {
    let cleaned_and_allowed = DocumentOptions {
        safe_html: true,
        sanitizer: SanitizerConfig {
            add_tags: vec!["script".to_string()],
            ..SanitizerConfig::default()
        },
    };
    assert!(matches!(
        Document::from_html("<p>x</p>", cleaned_and_allowed),
        Err(Error::Sanitization(_))
    ));

    let rel_allowed = DocumentOptions {
        safe_html: true,
        sanitizer: SanitizerConfig {
            generic_attributes: Some(vec!["rel".to_string()]),
            ..SanitizerConfig::default()
        },
    };
    assert!(matches!(
        Document::from_html("<p>x</p>", rel_allowed),
        Err(Error::Sanitization(_))
    ));

    let mut per_tag = BTreeMap::new();
    per_tag.insert("script".to_string(), vec!["src".to_string()]);
    let attributes_on_cleaned = DocumentOptions {
        safe_html: true,
        sanitizer: SanitizerConfig {
            tag_attributes: Some(per_tag),
            ..SanitizerConfig::default()
        },
    };
    assert!(matches!(
        Document::from_html("<p>x</p>", attributes_on_cleaned),
        Err(Error::Sanitization(_))
    ));
}

#[test]
fn test_tag_attributes_respected() {
    let mut per_tag = BTreeMap::new();
    per_tag.insert("span".to_string(), vec!["style".to_string()]);
    let options = DocumentOptions {
        safe_html: true,
        sanitizer: SanitizerConfig {
            tag_attributes: Some(per_tag),
            add_tags: vec!["span".to_string()],
            ..SanitizerConfig::default()
        },
    };
    let doc = Document::from_bbcode("[color=red]x[/color]", options).unwrap();
    assert!(doc.html().contains(r#"<span style="color:red;">x</span>"#));
}
