//! Discord Markdown tests

use textfmt_babel::{Document, DocumentOptions};

fn discord_of_markdown(source: &str) -> String {
    Document::from_markdown(source, DocumentOptions::default())
        .unwrap()
        .to_discord_markdown()
        .unwrap()
}

#[test]
fn test_link_with_display_text() {
    assert_eq!(
        discord_of_markdown("[Google](https://google.com)"),
        "Google ( <https://google.com> )"
    );
}

#[test]
fn test_link_equal_to_target() {
    assert_eq!(
        discord_of_markdown("[https://google.com](https://google.com)"),
        "https://google.com"
    );
}

#[test]
fn test_keeps_standard_emphasis_and_escapes() {
    assert_eq!(
        discord_of_markdown("**bold** and snake\\_case"),
        "**bold** and snake\\_case"
    );
}

#[test]
fn test_multiple_links() {
    assert_eq!(
        discord_of_markdown("[a](https://a.org) then [b](https://b.org)"),
        "a ( <https://a.org> ) then b ( <https://b.org> )"
    );
}
