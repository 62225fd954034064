use super::client::HttpClient;
use super::policy::{DomainPolicy, normalize_url};
use super::scrape::{extract_title, file_name_title};
use super::service::lookup_title;
use crate::config::{Configuration, TITLE_SERVICE_KEY_LEN};
use crate::editor::Notifier;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const SITE_UNREACHABLE: &str = "Site Unreachable";
pub const TITLE_UNKNOWN: &str = "Title Unknown";

/// Where a title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleOrigin {
    /// Host name of a blacklisted URL; rendered as-is, never fetched.
    Blacklisted,
    Service,
    Page,
    /// Final path segment of a non-HTML resource.
    FileName,
    /// Synthetic stand-in for a missing or unreachable title.
    Sentinel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFetchResult {
    pub title: String,
    pub sentinel: bool,
    pub origin: TitleOrigin,
}

impl TitleFetchResult {
    fn found(title: impl Into<String>, origin: TitleOrigin) -> Self {
        Self {
            title: title.into(),
            sentinel: false,
            origin,
        }
    }

    fn sentinel(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sentinel: true,
            origin: TitleOrigin::Sentinel,
        }
    }
}

/// Produces a raw title for a URL in one attempt. Every path ends in a
/// [`TitleFetchResult`]; transport and parse failures become sentinels.
pub struct TitleFetcher<C> {
    client: C,
    notifier: Arc<dyn Notifier>,
    key_notice_shown: AtomicBool,
}

impl<C: HttpClient> TitleFetcher<C> {
    pub fn new(client: C, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            key_notice_shown: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn fetch(
        &self,
        url: &str,
        policy: &DomainPolicy,
        config: &Configuration,
    ) -> TitleFetchResult {
        if let Some(host) = policy.blocked_host(url) {
            tracing::debug!(url = %url, host = %host, "blacklisted, skipping fetch");
            return TitleFetchResult::found(host, TitleOrigin::Blacklisted);
        }

        let target = normalize_url(url);
        if let Some(title) = self.title_from_service(&target, config).await {
            return TitleFetchResult::found(title, TitleOrigin::Service);
        }

        self.title_from_page(&target).await
    }

    async fn title_from_service(&self, url: &str, config: &Configuration) -> Option<String> {
        let configured = config.title_service_api_key.trim();
        if configured.is_empty() {
            return None;
        }

        let Some(key) = config.title_service_key() else {
            self.notice_rejected_key(configured.chars().count());
            return None;
        };

        match lookup_title(&self.client, &config.title_service_endpoint, key, url).await {
            Ok(Some(title)) => Some(title),
            Ok(None) => {
                tracing::debug!(url = %url, "title service returned no title, scraping page");
                None
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "title service failed, scraping page");
                None
            }
        }
    }

    fn notice_rejected_key(&self, len: usize) {
        if self.key_notice_shown.swap(true, Ordering::Relaxed) {
            return;
        }
        tracing::warn!(len, "title service key rejected");
        self.notifier.notify(&format!(
            "Title service key must be {TITLE_SERVICE_KEY_LEN} characters (got {len}); fetching pages directly."
        ));
    }

    async fn title_from_page(&self, url: &str) -> TitleFetchResult {
        match self.client.head(url).await {
            // Servers that refuse HEAD still get a body fetch.
            Ok(head) if matches!(head.status, 405 | 501) => {}
            Ok(head) if !head.is_success() => {
                tracing::debug!(url = %url, status = head.status, "page check failed");
                return TitleFetchResult::sentinel(SITE_UNREACHABLE);
            }
            Ok(head) if head.content_type.is_some() && !head.is_html() => {
                return TitleFetchResult::found(file_name_title(url), TitleOrigin::FileName);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "page check errored, fetching body anyway");
            }
        }

        let page = match self.client.get(url, &[]).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                tracing::debug!(url = %url, status = page.status, "page fetch failed");
                return TitleFetchResult::sentinel(SITE_UNREACHABLE);
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "page fetch failed");
                return TitleFetchResult::sentinel(SITE_UNREACHABLE);
            }
        };

        match extract_title(&page.body) {
            Some(title) => TitleFetchResult::found(title, TitleOrigin::Page),
            None => {
                tracing::debug!(url = %url, "page has no usable title");
                TitleFetchResult::sentinel(TITLE_UNKNOWN)
            }
        }
    }
}
