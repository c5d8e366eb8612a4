//! HTML sanitization
//!
//! Sanitizing is delegated to `ammonia`. [`SanitizerConfig`] mirrors the
//! allow-list knobs of its builder; every field left unset keeps ammonia's
//! default. A configuration is validated before any HTML is touched, so a
//! contradictory allow-list fails with [`Error::Sanitization`] instead of
//! producing surprising output.

use crate::error::{Error, Result};
use ammonia::Builder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Allow-list configuration for the sanitizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Complete set of allowed tags, replacing the defaults
    pub tags: Option<Vec<String>>,
    /// Tags allowed on top of `tags` (or the defaults)
    pub add_tags: Vec<String>,
    /// Tags removed together with their content
    pub clean_content_tags: Option<Vec<String>>,
    /// Attributes allowed on every tag
    pub generic_attributes: Option<Vec<String>>,
    /// Attributes allowed per tag
    pub tag_attributes: Option<BTreeMap<String, Vec<String>>>,
    /// Allowed URL schemes
    pub url_schemes: Option<Vec<String>>,
    /// `rel` value forced on links; `Some("")` disables it
    pub link_rel: Option<String>,
    pub strip_comments: Option<bool>,
}

impl SanitizerConfig {
    /// Check the configuration for combinations the sanitizer cannot honour
    pub fn validate(&self) -> Result<()> {
        let builder = self.builder();

        let allowed = builder.clone_tags();
        let mut conflicting: Vec<&str> = builder
            .clone_clean_content_tags()
            .into_iter()
            .filter(|tag| allowed.contains(tag))
            .collect();
        if !conflicting.is_empty() {
            conflicting.sort_unstable();
            return Err(Error::Sanitization(format!(
                "tags both allowed and content-cleaned: {}",
                conflicting.join(", ")
            )));
        }

        let cleaned = builder.clone_clean_content_tags();
        if let Some(per_tag) = &self.tag_attributes {
            let attributed: Vec<&str> = per_tag
                .keys()
                .map(String::as_str)
                .filter(|tag| cleaned.contains(tag))
                .collect();
            if !attributed.is_empty() {
                return Err(Error::Sanitization(format!(
                    "tags both content-cleaned and given attributes: {}",
                    attributed.join(", ")
                )));
            }
        }

        if self.manages_rel() {
            let generic_rel = self
                .generic_attributes
                .as_ref()
                .is_some_and(|attrs| attrs.iter().any(|a| a == "rel"));
            let tag_rel = self.tag_attributes.as_ref().and_then(|tags| {
                tags.iter()
                    .find(|(_, attrs)| attrs.iter().any(|a| a == "rel"))
                    .map(|(tag, _)| tag.as_str())
            });

            if generic_rel {
                return Err(Error::Sanitization(
                    "'rel' cannot be a generic attribute while link_rel is set".to_string(),
                ));
            }
            if let Some(tag) = tag_rel {
                return Err(Error::Sanitization(format!(
                    "'rel' cannot be allowed on <{tag}> while link_rel is set"
                )));
            }
        }

        Ok(())
    }

    /// Sanitize `html` with this configuration
    pub fn clean(&self, html: &str) -> Result<String> {
        self.validate()?;
        let cleaned = self.builder().clean(html).to_string();
        tracing::trace!(
            before = html.len(),
            after = cleaned.len(),
            "sanitized html"
        );
        Ok(cleaned)
    }

    fn manages_rel(&self) -> bool {
        match &self.link_rel {
            Some(rel) => !rel.is_empty(),
            None => true,
        }
    }

    fn builder(&self) -> Builder<'_> {
        let mut builder = Builder::default();

        if let Some(tags) = &self.tags {
            builder.tags(as_set(tags));
        }
        if !self.add_tags.is_empty() {
            builder.add_tags(self.add_tags.iter().map(String::as_str));
        }
        if let Some(tags) = &self.clean_content_tags {
            builder.clean_content_tags(as_set(tags));
        }
        if let Some(attrs) = &self.generic_attributes {
            builder.generic_attributes(as_set(attrs));
        }
        if let Some(per_tag) = &self.tag_attributes {
            let map: HashMap<&str, HashSet<&str>> = per_tag
                .iter()
                .map(|(tag, attrs)| (tag.as_str(), as_set(attrs)))
                .collect();
            builder.tag_attributes(map);
        }
        if let Some(schemes) = &self.url_schemes {
            builder.url_schemes(as_set(schemes));
        }
        if let Some(rel) = &self.link_rel {
            builder.link_rel(if rel.is_empty() { None } else { Some(rel.as_str()) });
        }
        if let Some(strip) = self.strip_comments {
            builder.strip_comments(strip);
        }

        builder
    }
}

fn as_set(values: &[String]) -> HashSet<&str> {
    values.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strips_scripts() {
        let cleaned = SanitizerConfig::default()
            .clean("<p>hi<script>alert(1)</script></p>")
            .unwrap();
        assert_eq!(cleaned, "<p>hi</p>");
    }

    #[test]
    fn test_default_link_rel() {
        let cleaned = SanitizerConfig::default()
            .clean(r#"<a href="https://x.org">x</a>"#)
            .unwrap();
        assert_eq!(
            cleaned,
            r#"<a href="https://x.org" rel="noopener noreferrer">x</a>"#
        );
    }

    #[test]
    fn test_custom_tags() {
        let config = SanitizerConfig {
            tags: Some(vec!["b".to_string()]),
            ..SanitizerConfig::default()
        };
        assert_eq!(config.clean("<p><b>x</b><i>y</i></p>").unwrap(), "<b>x</b>y");
    }

    #[test]
    fn test_add_tags_keeps_custom_elements() {
        let config = SanitizerConfig {
            add_tags: vec!["eicon".to_string()],
            ..SanitizerConfig::default()
        };
        assert_eq!(config.clean("<eicon>wave</eicon>").unwrap(), "<eicon>wave</eicon>");
    }

    #[test]
    fn test_allowed_and_cleaned_conflict() {
        let config = SanitizerConfig {
            add_tags: vec!["script".to_string()],
            ..SanitizerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Sanitization(_))));
        assert!(matches!(config.clean("<p></p>"), Err(Error::Sanitization(_))));
    }

    #[test]
    fn test_rel_conflict() {
        let mut per_tag = BTreeMap::new();
        per_tag.insert("a".to_string(), vec!["href".to_string(), "rel".to_string()]);
        let config = SanitizerConfig {
            tag_attributes: Some(per_tag),
            ..SanitizerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Sanitization(_))));

        let unmanaged = SanitizerConfig {
            link_rel: Some(String::new()),
            ..config
        };
        assert!(unmanaged.validate().is_ok());
    }

    #[test]
    fn test_attributes_on_cleaned_tag_conflict() {
        let mut per_tag = BTreeMap::new();
        per_tag.insert("script".to_string(), vec!["src".to_string()]);
        let config = SanitizerConfig {
            tag_attributes: Some(per_tag),
            ..SanitizerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Sanitization(_))));
        assert!(matches!(config.clean("<p>x</p>"), Err(Error::Sanitization(_))));
    }
}
