//! Import tests for Markdown (Markdown → HTML)

use textfmt_babel::FormatRegistry;

fn import(source: &str) -> String {
    FormatRegistry::default().parse(source, "markdown").unwrap()
}

#[test]
fn test_inline_markup() {
    assert_eq!(
        import("*some bold text here* and a [markdown link](https://www.google.com)"),
        "<p><em>some bold text here</em> and a <a href=\"https://www.google.com\">markdown link</a></p>\n"
    );
}

#[test]
fn test_headings_and_lists() {
    assert_eq!(
        import("# Title\n\n- a\n- b\n"),
        "<h1>Title</h1>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
    );
}

#[test]
fn test_cf_markers_compile_as_emphasis() {
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.parse("'''bold''' ''it''", "cf").unwrap(),
        "<p><strong>bold</strong> <em>it</em></p>\n"
    );
}
