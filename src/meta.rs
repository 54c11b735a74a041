//! Page metadata resolution
//!
//! Turns loosely specified page facts (possibly using deprecated aliases such
//! as `canonicalHost`) into the canonical [`Meta`] record consumed by node
//! descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::GraphError;
use crate::id::join_url;

/// Raw, caller-supplied page facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaInput {
    #[serde(default, alias = "canonicalHost")]
    pub host: Option<String>,
    #[serde(default, alias = "canonicalUrl")]
    pub url: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, alias = "defaultLanguage")]
    pub in_language: Option<String>,
    #[serde(default, alias = "defaultCurrency")]
    pub currency: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub date_modified: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl MetaInput {
    /// Metadata for a page at the root of `host`
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Default::default()
        }
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merged_with(self, other: MetaInput) -> Self {
        Self {
            host: other.host.or(self.host),
            url: other.url.or(self.url),
            path: other.path.or(self.path),
            in_language: other.in_language.or(self.in_language),
            currency: other.currency.or(self.currency),
            title: other.title.or(self.title),
            description: other.description.or(self.description),
            date_published: other.date_published.or(self.date_published),
            date_modified: other.date_modified.or(self.date_modified),
            image: other.image.or(self.image),
        }
    }
}

/// Canonical page metadata for one graph build
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    /// Site origin, always with a trailing slash
    pub host: String,
    /// Canonical url of the page
    pub url: String,
    pub in_language: Option<String>,
    pub currency: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
    pub image: Option<String>,
}

/// A metadata field a descriptor may inherit from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Host,
    Url,
    InLanguage,
    Currency,
    Title,
    Description,
    DatePublished,
    DateModified,
    Image,
}

impl MetaField {
    /// The node property this field maps to when inherited under its own name
    pub const fn property(self) -> &'static str {
        match self {
            MetaField::Host => "host",
            MetaField::Url => "url",
            MetaField::InLanguage => "inLanguage",
            MetaField::Currency => "currency",
            MetaField::Title => "title",
            MetaField::Description => "description",
            MetaField::DatePublished => "datePublished",
            MetaField::DateModified => "dateModified",
            MetaField::Image => "image",
        }
    }
}

impl Meta {
    /// Resolve raw input, applying the url precedence:
    /// explicit `url` > `host` + `path` > `host`
    pub fn resolve(input: MetaInput) -> Result<Self, GraphError> {
        let host = match (&input.host, &input.url) {
            (Some(host), _) => normalize_host(host)?,
            (None, Some(url)) => origin_of(url)?,
            (None, None) => return Err(GraphError::MissingHost),
        };

        let url = match (&input.url, &input.path) {
            (Some(url), _) => {
                parse(url)?;
                url.clone()
            }
            (None, Some(path)) if !path.is_empty() && path != "/" => join_url(&host, path),
            _ => host.clone(),
        };

        Ok(Self {
            host,
            url,
            in_language: non_empty(input.in_language),
            currency: non_empty(input.currency),
            title: non_empty(input.title),
            description: non_empty(input.description),
            date_published: non_empty(input.date_published),
            date_modified: non_empty(input.date_modified),
            image: non_empty(input.image),
        })
    }

    /// Look up a field as a JSON value
    pub fn get(&self, field: MetaField) -> Option<Value> {
        let value = match field {
            MetaField::Host => Some(&self.host),
            MetaField::Url => Some(&self.url),
            MetaField::InLanguage => self.in_language.as_ref(),
            MetaField::Currency => self.currency.as_ref(),
            MetaField::Title => self.title.as_ref(),
            MetaField::Description => self.description.as_ref(),
            MetaField::DatePublished => self.date_published.as_ref(),
            MetaField::DateModified => self.date_modified.as_ref(),
            MetaField::Image => self.image.as_ref(),
        };
        value.map(|v| Value::String(v.clone()))
    }

    /// Whether the canonical url is the site root
    pub fn is_home_page(&self) -> bool {
        self.url.trim_end_matches('/') == self.host.trim_end_matches('/')
    }
}

fn parse(url: &str) -> Result<Url, GraphError> {
    Url::parse(url).map_err(|e| GraphError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn normalize_host(host: &str) -> Result<String, GraphError> {
    parse(host)?;
    if host.ends_with('/') {
        Ok(host.to_string())
    } else {
        Ok(format!("{}/", host))
    }
}

fn origin_of(url: &str) -> Result<String, GraphError> {
    let parsed = parse(url)?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return Err(GraphError::InvalidUrl {
            url: url.to_string(),
            reason: "url has no origin".to_string(),
        });
    }
    Ok(format!("{}/", origin.ascii_serialization()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_only() {
        let meta = Meta::resolve(MetaInput::for_host("https://example.com")).unwrap();
        assert_eq!(meta.host, "https://example.com/");
        assert_eq!(meta.url, "https://example.com/");
        assert!(meta.is_home_page());
    }

    #[test]
    fn test_host_and_path() {
        let meta = Meta::resolve(MetaInput {
            path: Some("/blog/post".to_string()),
            ..MetaInput::for_host("https://example.com/")
        })
        .unwrap();
        assert_eq!(meta.url, "https://example.com/blog/post");
        assert!(!meta.is_home_page());
    }

    #[test]
    fn test_explicit_url_wins_over_path() {
        let meta = Meta::resolve(MetaInput {
            url: Some("https://example.com/canonical".to_string()),
            path: Some("/ignored".to_string()),
            ..MetaInput::for_host("https://example.com/")
        })
        .unwrap();
        assert_eq!(meta.url, "https://example.com/canonical");
    }

    #[test]
    fn test_host_derived_from_url() {
        let meta = Meta::resolve(MetaInput {
            url: Some("https://example.com/about-us".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(meta.host, "https://example.com/");
    }

    #[test]
    fn test_missing_host() {
        let result = Meta::resolve(MetaInput::default());
        assert!(matches!(result, Err(GraphError::MissingHost)));
    }

    #[test]
    fn test_invalid_host() {
        let result = Meta::resolve(MetaInput::for_host("not a url"));
        assert!(matches!(result, Err(GraphError::InvalidUrl { .. })));
    }

    #[test]
    fn test_deprecated_aliases() {
        let input: MetaInput = serde_json::from_value(serde_json::json!({
            "canonicalHost": "https://example.com/",
            "canonicalUrl": "https://example.com/test",
            "defaultLanguage": "en-AU",
            "defaultCurrency": "AUD"
        }))
        .unwrap();
        let meta = Meta::resolve(input).unwrap();
        assert_eq!(meta.url, "https://example.com/test");
        assert_eq!(meta.in_language.as_deref(), Some("en-AU"));
        assert_eq!(meta.currency.as_deref(), Some("AUD"));
    }

    #[test]
    fn test_merged_with() {
        let base = MetaInput {
            title: Some("From file".to_string()),
            ..MetaInput::for_host("https://example.com/")
        };
        let merged = base.merged_with(MetaInput {
            title: Some("From flag".to_string()),
            ..Default::default()
        });
        assert_eq!(merged.title.as_deref(), Some("From flag"));
        assert_eq!(merged.host.as_deref(), Some("https://example.com/"));
    }
}
