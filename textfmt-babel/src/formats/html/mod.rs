//! HTML format implementation
//!
//! HTML is the canonical representation, so both directions are the identity.
//! Sanitizing is not a format concern; see [`crate::sanitize`].

use crate::error::Result;
use crate::format::Format;

/// Format implementation for HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML (canonical form)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }

    fn serialize(&self, html: &str) -> Result<String> {
        Ok(html.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let html = "<p>a <b>b</b></p><script>x</script>";
        assert_eq!(HtmlFormat.parse(html).unwrap(), html);
        assert_eq!(HtmlFormat.serialize(html).unwrap(), html);
    }
}
