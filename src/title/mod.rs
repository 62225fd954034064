pub mod client;
pub mod fetcher;
pub mod policy;
pub mod postprocess;
pub mod scrape;
pub mod service;

pub use client::{HttpClient, HttpResponse, ReqwestClient};
pub use fetcher::{SITE_UNREACHABLE, TITLE_UNKNOWN, TitleFetchResult, TitleFetcher, TitleOrigin};
pub use policy::DomainPolicy;
