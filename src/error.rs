use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `autolink-title`.
///
/// The conversion engine itself never surfaces these to the host: fetch
/// failures become sentinel titles and a lost placeholder is a plain
/// [`CommitOutcome`](crate::editor::CommitOutcome). They appear at the edges,
/// where configuration is loaded and the CLI talks to the filesystem.
#[derive(Debug, Error)]
pub enum LinkTitleError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Fetch ────────────────────────────────────────────────────────────
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    // ── Buffer ───────────────────────────────────────────────────────────
    #[error("buffer: {0}")]
    Buffer(#[from] BufferError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Fetch errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}

// ─── Buffer errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("position {line}:{column} is outside the buffer")]
    OutOfRange { line: usize, column: usize },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, LinkTitleError>;
