//! Render tests for BBCode (BBCode → HTML)

use insta::assert_snapshot;
use textfmt_babel::formats::bbcode::{BbcodeOptions, BbcodeParser, TagRegistry, TagSpec};
use textfmt_babel::{Error, Format, FormatRegistry};

fn render(source: &str) -> String {
    FormatRegistry::default().parse(source, "bbcode").unwrap()
}

#[test]
fn test_bold() {
    assert_snapshot!(render("[b]text[/b]"), @"<strong>text</strong><br>");
}

#[test]
fn test_eicon_is_lowercased_and_escaped() {
    assert_eq!(
        render("[eicon]Wave[/eicon]"),
        r#"<img src="https://static.f-list.net/images/eicon/wave.gif" height=50 width=50><br>"#
    );
    assert_eq!(
        render("[eicon]Big Wave[/eicon]"),
        r#"<img src="https://static.f-list.net/images/eicon/big%20wave.gif" height=50 width=50><br>"#
    );
}

#[test]
fn test_icon_uses_avatar_path() {
    assert_eq!(
        render("[icon]Some Name[/icon]"),
        r#"<img src="https://static.f-list.net/images/avatar/some%20name.png" height=50 width=50><br>"#
    );
}

#[test]
fn test_code_block_is_literal() {
    assert_eq!(
        render("[code]let x = 1;[/code]"),
        "[code]\nlet x = 1;\n[/code]<br>"
    );
}

#[test]
fn test_collapse_with_title() {
    assert_eq!(
        render("[collapse=Collapsible title]Some collapsible content[/collapse]"),
        "<details>\n<summary>Collapsible title</summary>\n\nSome collapsible content\n</details><br>"
    );
}

#[test]
fn test_collapse_default_title() {
    assert_eq!(
        render("[collapse]Some collapsible content without title[/collapse]"),
        "<details>\n<summary>Click to expand</summary>\n\nSome collapsible content without title\n</details><br>"
    );
}

#[test]
fn test_collapse_single_quote_breaks_tag() {
    let html = render("[collapse=It's broken]Body[/collapse]");
    assert!(html.contains("[collapse=It&#39;s broken]"));
    assert!(!html.contains("<details>"));
}

#[test]
fn test_heading_levels() {
    assert_eq!(render("[heading level=2]Title[/heading]"), "<h2>Title</h2><br>");
    assert_eq!(render("[heading]Title[/heading]"), "<h4>Title</h4><br>");
    assert_eq!(render("[heading=2]Title[/heading]"), "<h4>Title</h4><br>");
}

#[test]
fn test_empty_heading_renders_empty() {
    assert_eq!(render("[heading][/heading]"), "<h4></h4><br>");
}

#[test]
fn test_bad_heading_level_fails() {
    let registry = FormatRegistry::default();
    for source in [
        "[heading level=abc]x[/heading]",
        "[heading level=7]x[/heading]",
    ] {
        match registry.parse(source, "bbcode") {
            Err(Error::Format { tag, option, .. }) => {
                assert_eq!(tag, "heading");
                assert_eq!(option, "level");
            }
            other => panic!("expected a format error for {source}, got {other:?}"),
        }
    }
}

#[test]
fn test_horizontal_rules() {
    assert_eq!(render("a\n===\nb"), "a<br><hr /><br>b<br>");
    assert_eq!(render("a\r\n-----\r\nb"), "a<br><hr /><br>b<br>");
    assert_eq!(render("=="), "==<br>");
}

#[test]
fn test_unknown_tags_pass_through() {
    assert_eq!(render("[spoiler]x[/spoiler]"), "[spoiler]x[/spoiler]<br>");
}

#[test]
fn test_demo_lines() {
    assert_eq!(
        render("Heres a link https://google.com"),
        r#"Heres a link <a href="https://google.com">https://google.com</a><br>"#
    );
    assert_eq!(
        render("also some [b]text[/b] on another line"),
        "also some <strong>text</strong> on another line<br>"
    );
    assert_eq!(
        render("[color=red][b]colored bold text[/b][/color]"),
        r#"<span style="color:red;"><strong>colored bold text</strong></span><br>"#
    );
}

#[test]
fn test_custom_tags_on_a_custom_registry() {
    let mut tags = TagRegistry::with_defaults();
    tags.register("spoiler", TagSpec::template(r#"<span class="spoiler">{value}</span>"#));
    let parser = BbcodeParser::with_tags(tags, BbcodeOptions::default());

    let mut registry = FormatRegistry::default();
    registry.register(textfmt_babel::formats::bbcode::BbcodeFormat::new(parser));

    assert_eq!(
        registry.parse("[SPOILER]x[/spoiler]", "bbcode").unwrap(),
        r#"<span class="spoiler">x</span><br>"#
    );
    assert!(registry.get("bbcode").unwrap().supports_parsing());
}
