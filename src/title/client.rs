use crate::config::Configuration;
use crate::error::FetchError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// The parts of an HTTP response the title pipeline looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"))
    }
}

pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse, FetchError>> + Send + 'a>>;

/// Network transport used to reach pages and the title-lookup service.
pub trait HttpClient: Send + Sync {
    /// Header-only request; `body` is empty.
    fn head<'a>(&'a self, url: &'a str) -> HttpFuture<'a>;

    fn get<'a>(&'a self, url: &'a str, headers: &'a [(&'a str, &'a str)]) -> HttpFuture<'a>;
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("autolink-title/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Request {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    pub fn from_config(config: &Configuration) -> Result<Self, FetchError> {
        Self::new(config.request_timeout_secs)
    }

    async fn send(
        url: &str,
        request: reqwest::RequestBuilder,
        read_body: bool,
    ) -> Result<HttpResponse, FetchError> {
        if url::Url::parse(url).is_err() {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }
        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(request_error)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = if read_body {
            response.text().await.map_err(request_error)?
        } else {
            String::new()
        };

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn head<'a>(&'a self, url: &'a str) -> HttpFuture<'a> {
        Box::pin(async move { Self::send(url, self.client.head(url), false).await })
    }

    fn get<'a>(&'a self, url: &'a str, headers: &'a [(&'a str, &'a str)]) -> HttpFuture<'a> {
        Box::pin(async move {
            let mut request = self.client.get(url);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }
            Self::send(url, request, true).await
        })
    }
}
