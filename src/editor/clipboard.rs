use std::future::Future;
use std::pin::Pin;

/// Source of pasted text.
pub trait ClipboardSource: Send + Sync {
    fn read_text(&self) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>>;
}

/// Clipboard holding a fixed string, for hosts that already have the text.
#[derive(Debug, Clone, Default)]
pub struct StaticClipboard {
    text: Option<String>,
}

impl StaticClipboard {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ClipboardSource for StaticClipboard {
    fn read_text(&self) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>> {
        Box::pin(async move { self.text.clone() })
    }
}
