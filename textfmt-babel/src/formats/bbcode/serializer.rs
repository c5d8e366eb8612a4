//! BBCode serialization (HTML → BBCode)
//!
//! A best-effort reduction, not a parser: a fixed, ordered table of regex
//! substitutions is applied to the HTML string, one non-greedy pass per entry.
//! Matches never cross a line break. Nested instances of the same tag can be
//! mis-paired; that is an accepted limitation of the reduction.
//!
//! | HTML                                | BBCode                     |
//! |-------------------------------------|----------------------------|
//! | `<b>`, `<strong>`                   | `[b]…[/b]`                 |
//! | `<i>`, `<em>`                       | `[i]…[/i]`                 |
//! | `<p>`                               | unwrapped                  |
//! | `<u>`, `<s>`                        | `[u]…[/u]`, `[s]…[/s]`     |
//! | `<eicon>`, `<icon>`, `<code>`       | same-named tag             |
//! | `<a href="…">…</a>`                 | `[url=…]…[/url]`           |
//! | `<span style="color:…;">…</span>`   | `[color=…]…[/color]`       |

use once_cell::sync::Lazy;
use regex::Regex;

const TAG_PAIRS: &[(&str, &str)] = &[
    ("b", "b"),
    ("strong", "b"),
    ("i", "i"),
    ("em", "i"),
    ("p", ""),
    ("u", "u"),
    ("s", "s"),
    ("eicon", "eicon"),
    ("icon", "icon"),
    ("code", "code"),
];

static REDUCTIONS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    let mut rules: Vec<(Regex, String)> = TAG_PAIRS
        .iter()
        .map(|(html, bbcode)| {
            let pattern = Regex::new(&format!("<{html}>(.*?)</{html}>"))
                .expect("REDUCTIONS: tag pattern is valid");
            let replacement = if bbcode.is_empty() {
                "${1}".to_string()
            } else {
                format!("[{bbcode}]${{1}}[/{bbcode}]")
            };
            (pattern, replacement)
        })
        .collect();

    rules.push((
        Regex::new(r#"<a href="(.*?)">(.*?)</a>"#).expect("REDUCTIONS: anchor pattern is valid"),
        "[url=${1}]${2}[/url]".to_string(),
    ));
    rules.push((
        Regex::new(r#"<span style="color:(.*?);">(.*?)</span>"#)
            .expect("REDUCTIONS: color pattern is valid"),
        "[color=${1}]${2}[/color]".to_string(),
    ));
    rules
});

/// Reduce canonical HTML to BBCode. Total: unknown markup is left as is.
pub fn serialize_to_bbcode(html: &str) -> String {
    let reduced = REDUCTIONS
        .iter()
        .fold(html.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, replacement.as_str()).into_owned()
        });
    reduced.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_tags() {
        assert_eq!(serialize_to_bbcode("<p><strong>x</strong></p>"), "[b]x[/b]");
        assert_eq!(
            serialize_to_bbcode("<b>a</b> <em>b</em> <u>c</u> <s>d</s>"),
            "[b]a[/b] [i]b[/i] [u]c[/u] [s]d[/s]"
        );
    }

    #[test]
    fn test_links_and_colors() {
        assert_eq!(
            serialize_to_bbcode(r#"<a href="https://example.com">site</a>"#),
            "[url=https://example.com]site[/url]"
        );
        assert_eq!(
            serialize_to_bbcode(r#"<span style="color:red;">hot</span>"#),
            "[color=red]hot[/color]"
        );
    }

    #[test]
    fn test_unknown_markup_kept() {
        assert_eq!(
            serialize_to_bbcode("  <h2>Title</h2><br>  "),
            "<h2>Title</h2><br>"
        );
    }

    #[test]
    fn test_matches_stay_on_one_line() {
        assert_eq!(serialize_to_bbcode("<b>a\nb</b>"), "<b>a\nb</b>");
    }

    #[test]
    fn test_nested_same_tag_is_mispaired() {
        assert_eq!(
            serialize_to_bbcode("<b>a<b>b</b>c</b>"),
            "[b]a<b>b[/b]c</b>"
        );
    }
}
