//! HTML tree helpers shared by the serializers
//!
//! Canonical HTML is parsed with `html5ever` into a `markup5ever_rcdom` tree.
//! Parsing never fails: malformed markup is repaired the way a browser would.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML string (document or fragment) into a DOM
pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// Local tag name of an element node
pub fn element_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Value of an attribute on an element node
pub fn attr(handle: &Handle, name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

pub fn is_text(handle: &Handle) -> bool {
    matches!(handle.data, NodeData::Text { .. })
}

/// Concatenated text of every text node below `handle`, skipping the
/// subtrees of elements named in `skip`
///
/// Iterative, so arbitrarily deep trees are fine.
pub fn text_content(handle: &Handle, skip: &[&str]) -> String {
    let mut out = String::new();
    let mut pending = vec![handle.clone()];
    while let Some(node) = pending.pop() {
        match &node.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { name, .. } if skip.contains(&&*name.local) => {}
            NodeData::Document | NodeData::Element { .. } => {
                pending.extend(node.children.borrow().iter().rev().cloned());
            }
            _ => {}
        }
    }
    out
}

/// Whitespace-only text containing a line break: source formatting, not content
pub fn is_formatting_whitespace(handle: &Handle) -> bool {
    match &handle.data {
        NodeData::Text { contents } => {
            let text = contents.borrow();
            text.trim().is_empty() && text.contains('\n')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_element(handle: &Handle, tag: &str) -> Option<Handle> {
        if element_name(handle) == Some(tag) {
            return Some(handle.clone());
        }
        handle
            .children
            .borrow()
            .iter()
            .find_map(|child| first_element(child, tag))
    }

    #[test]
    fn test_fragment_lands_in_body() {
        let dom = parse_html("<p>hi</p>");
        let body = first_element(&dom.document, "body").unwrap();
        assert_eq!(text_content(&body, &[]), "hi");
    }

    #[test]
    fn test_attr_lookup() {
        let dom = parse_html(r#"<a href="https://x.org" title="X">x</a>"#);
        let anchor = first_element(&dom.document, "a").unwrap();
        assert_eq!(attr(&anchor, "href").as_deref(), Some("https://x.org"));
        assert_eq!(attr(&anchor, "title").as_deref(), Some("X"));
        assert_eq!(attr(&anchor, "rel"), None);
    }

    #[test]
    fn test_text_content_skips() {
        let dom = parse_html("<p>a<script>bad()</script>b</p><style>p{}</style>");
        assert_eq!(text_content(&dom.document, &["script", "style"]), "ab");
    }

    #[test]
    fn test_unknown_elements_survive() {
        let dom = parse_html("<eicon>wave</eicon>");
        let eicon = first_element(&dom.document, "eicon").unwrap();
        assert!(is_text(&eicon.children.borrow()[0]));
    }

    #[test]
    fn test_formatting_whitespace() {
        let dom = parse_html("<p><b>a</b>\n<i>b</i> <u>c</u></p>");
        let p = first_element(&dom.document, "p").unwrap();
        let children = p.children.borrow();
        assert!(is_formatting_whitespace(&children[1]));
        assert!(!is_formatting_whitespace(&children[3]));
        assert!(!is_formatting_whitespace(&children[0]));
    }

    #[test]
    fn test_text_content_of_deep_tree() {
        let html = format!("{}x", "<span>".repeat(20_000));
        let dom = parse_html(&html);
        assert_eq!(text_content(&dom.document, &[]), "x");
    }
}
