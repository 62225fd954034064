use crate::config::{Configuration, TitleTemplate};
use url::Url;

/// Domain rules consulted around a fetch: the blacklist before any network
/// call, the title templates after a raw title is in hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainPolicy {
    pub blacklist: Vec<String>,
    pub templates: Vec<TitleTemplate>,
}

impl DomainPolicy {
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            blacklist: parse_blacklist(&config.website_blacklist),
            templates: config.custom_title_templates.clone(),
        }
    }

    /// The URL's host when any blacklist entry occurs in it.
    pub fn blocked_host(&self, url: &str) -> Option<String> {
        let host = host_of(url)?;
        self.blacklist
            .iter()
            .any(|entry| host.contains(entry.as_str()))
            .then_some(host)
    }

    /// First template whose domain occurs anywhere in `url`.
    pub fn template_for(&self, url: &str) -> Option<&TitleTemplate> {
        self.templates
            .iter()
            .find(|t| !t.domain.is_empty() && url.contains(t.domain.as_str()))
    }
}

/// Split a comma or newline separated list, trimming entries and dropping
/// empty ones.
pub fn parse_blacklist(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Prefix `https://` onto URLs written without an http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.to_ascii_lowercase().starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

pub fn host_of(url: &str) -> Option<String> {
    Url::parse(&normalize_url(url))
        .ok()
        .and_then(|parsed| parsed.host_str().map(String::from))
}
