use crate::error::ConfigError;
use crate::links::TokenStrategy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Title-lookup service keys are exactly this many characters long.
pub const TITLE_SERVICE_KEY_LEN: usize = 32;

pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Fetching Title";

pub const DEFAULT_TITLE_SERVICE_ENDPOINT: &str = "https://api.linkpreview.net";

fn default_true() -> bool {
    true
}

fn default_placeholder_text() -> String {
    DEFAULT_PLACEHOLDER_TEXT.into()
}

fn default_title_service_endpoint() -> String {
    DEFAULT_TITLE_SERVICE_ENDPOINT.into()
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Per-domain rewrite of fetched titles.
///
/// When `domain` occurs anywhere in the link URL, the first match of the
/// `search` regex in the title is replaced by `replace` (`$1`-style group
/// references allowed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleTemplate {
    pub domain: String,
    pub search: String,
    #[serde(default)]
    pub replace: String,
}

/// Settings for one conversion. Loaded fresh at the start of each command
/// and passed down by reference, so edits apply to the next conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Path to config.toml - computed by the store, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Maximum title length in characters; 0 disables truncation.
    #[serde(default)]
    pub max_title_length: usize,

    /// Pasting a URL over a non-empty selection uses the selection as title.
    #[serde(default)]
    pub preserve_selection_as_title: bool,

    #[serde(default = "default_true")]
    pub enhance_on_paste: bool,

    #[serde(default = "default_true")]
    pub enhance_on_drop: bool,

    /// Emit `<a href="url">title</a>` instead of `[title](url)`.
    #[serde(default)]
    pub html_link: bool,

    /// Comma or newline separated host substrings that skip fetching.
    #[serde(default)]
    pub website_blacklist: String,

    #[serde(default)]
    pub custom_title_templates: Vec<TitleTemplate>,

    #[serde(default)]
    pub title_service_api_key: String,

    #[serde(default = "default_title_service_endpoint")]
    pub title_service_endpoint: String,

    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,

    #[serde(default)]
    pub token_strategy: TokenStrategy,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            max_title_length: 0,
            preserve_selection_as_title: false,
            enhance_on_paste: true,
            enhance_on_drop: true,
            html_link: false,
            website_blacklist: String::new(),
            custom_title_templates: Vec::new(),
            title_service_api_key: String::new(),
            title_service_endpoint: default_title_service_endpoint(),
            placeholder_text: default_placeholder_text(),
            token_strategy: TokenStrategy::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Configuration {
    /// The configured service key, if it has the required length.
    pub fn title_service_key(&self) -> Option<&str> {
        let key = self.title_service_api_key.trim();
        (key.chars().count() == TITLE_SERVICE_KEY_LEN).then_some(key)
    }

    /// Reject and clear a service key of the wrong length.
    ///
    /// Returns the validation error describing what was cleared so the
    /// caller can tell the user once.
    pub fn sanitize(&mut self) -> Option<ConfigError> {
        let key = self.title_service_api_key.trim();
        if key.is_empty() || key.chars().count() == TITLE_SERVICE_KEY_LEN {
            return None;
        }
        let len = key.chars().count();
        self.title_service_api_key.clear();
        Some(ConfigError::Validation(format!(
            "title service key must be {TITLE_SERVICE_KEY_LEN} characters, got {len}; key cleared"
        )))
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        // Service key: AUTOLINK_TITLE_SERVICE_KEY
        if let Ok(key) = std::env::var("AUTOLINK_TITLE_SERVICE_KEY")
            && !key.is_empty()
        {
            self.title_service_api_key = key;
        }

        // Truncation: AUTOLINK_TITLE_MAX_LENGTH
        if let Ok(max_str) = std::env::var("AUTOLINK_TITLE_MAX_LENGTH")
            && let Ok(max) = max_str.parse::<usize>()
        {
            self.max_title_length = max;
        }
    }
}
