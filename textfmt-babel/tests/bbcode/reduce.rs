//! Reduction tests for BBCode (HTML → BBCode)

use insta::assert_snapshot;
use textfmt_babel::FormatRegistry;

fn reduce(html: &str) -> String {
    FormatRegistry::default().serialize(html, "bbcode").unwrap()
}

#[test]
fn test_paragraph_unwrapped() {
    assert_snapshot!(reduce("<p><strong>x</strong></p>"), @"[b]x[/b]");
}

#[test]
fn test_table_order() {
    assert_eq!(
        reduce("<p><b>a</b><i>b</i><u>c</u><s>d</s><code>e</code></p>"),
        "[b]a[/b][i]b[/i][u]c[/u][s]d[/s][code]e[/code]"
    );
    assert_eq!(reduce("<eicon>wave</eicon> <icon>name</icon>"), "[eicon]wave[/eicon] [icon]name[/icon]");
}

#[test]
fn test_anchor_and_color() {
    assert_eq!(
        reduce(r#"<span style="color:red;"><a href="https://x.org">x</a></span>"#),
        "[color=red][url=https://x.org]x[/url][/color]"
    );
}

#[test]
fn test_bbcode_roundtrip_keeps_breaks() {
    let registry = FormatRegistry::default();
    let html = registry.parse("[b]text[/b]", "bbcode").unwrap();
    assert_eq!(registry.serialize(&html, "bbcode").unwrap(), "[b]text[/b]<br>");
}

#[test]
fn test_untranslated_markup_survives() {
    assert_eq!(
        reduce("<h2>Title</h2><ul><li>a</li></ul>"),
        "<h2>Title</h2><ul><li>a</li></ul>"
    );
}
