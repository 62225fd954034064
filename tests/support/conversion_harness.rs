#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use autolink_title::editor::{LinkTitleEngine, Notifier};
use autolink_title::error::FetchError;
use autolink_title::title::client::HttpFuture;
use autolink_title::title::{HttpClient, HttpResponse};

pub const HTML: &str = "text/html; charset=utf-8";

/// In-memory transport: canned responses per `"METHOD url"`, a call log,
/// and an optional gate that holds body fetches until released.
#[derive(Default)]
pub struct ScriptedClient {
    responses: HashMap<String, HttpResponse>,
    calls: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `url` as an HTML page titled `title`.
    pub fn page(self, url: &str, title: &str) -> Self {
        self.respond("HEAD", url, 200, HTML, "").respond(
            "GET",
            url,
            200,
            HTML,
            &format!("<html><head><title>{title}</title></head><body></body></html>"),
        )
    }

    pub fn respond(mut self, method: &str, url: &str, status: u16, content_type: &str, body: &str) -> Self {
        self.responses.insert(
            format!("{method} {url}"),
            HttpResponse {
                status,
                content_type: (!content_type.is_empty()).then(|| content_type.to_string()),
                body: body.to_string(),
            },
        );
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, key: String) -> Result<HttpResponse, FetchError> {
        self.calls.lock().unwrap().push(key.clone());
        self.responses.get(&key).cloned().ok_or(FetchError::Request {
            url: key,
            message: "connection refused".into(),
        })
    }
}

impl HttpClient for ScriptedClient {
    fn head<'a>(&'a self, url: &'a str) -> HttpFuture<'a> {
        Box::pin(async move { self.lookup(format!("HEAD {url}")) })
    }

    fn get<'a>(&'a self, url: &'a str, _headers: &'a [(&'a str, &'a str)]) -> HttpFuture<'a> {
        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.lookup(format!("GET {url}"))
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier(Mutex<Vec<String>>);

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

pub fn engine(client: ScriptedClient) -> LinkTitleEngine<ScriptedClient> {
    LinkTitleEngine::new(client, Arc::new(RecordingNotifier::default()))
}
