use super::types::{LinkCandidate, LinkKind};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Bare URL grammar: a scheme or a `www.` prefix, a host with at least one
/// dot, and no embedded whitespace.
const URL_BODY: &str = concat!(
    r"(?:https?://(?:www\.)?[a-z0-9][a-z0-9-]+[a-z0-9]\.[^\s]{2,}",
    r"|www\.[a-z0-9][a-z0-9-]+[a-z0-9]\.[^\s]{2,}",
    r"|https?://(?:www\.)?[a-z0-9]+\.[^\s]{2,}",
    r"|www\.[a-z0-9]+\.[^\s]{2,})",
);

/// Link label: anything but unescaped brackets. Escaped brackets are what
/// fetched titles carry after markdown escaping.
const LABEL: &str = r"(?:\\.|[^\[\]\\])*";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("built-in link pattern must compile: {e}"))
}

static URL_WHOLE: LazyLock<Regex> = LazyLock::new(|| compile(&format!("(?i)^{URL_BODY}$")));

static URL_LINE: LazyLock<Regex> = LazyLock::new(|| compile(&format!("(?i){URL_BODY}")));

static LINK_WHOLE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)^\[({LABEL})\]\(({URL_BODY})\)$")));

static LINK_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\[({LABEL})\]\(({URL_BODY})\)")));

/// Matched against the URL path, never the host.
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\.(gif|jpe?g|tiff?|png|webp|bmp|tga|psd|ai)$"));

/// Classify a text fragment. Markdown links win over bare URLs; image URLs
/// are bare URLs whose path ends in a known image extension.
pub fn classify(text: &str) -> LinkCandidate {
    let kind = if is_markdown_link(text) {
        LinkKind::MarkdownLink
    } else if is_url(text) {
        if is_image(text) {
            LinkKind::Image
        } else {
            LinkKind::BareUrl
        }
    } else {
        LinkKind::PlainText
    };

    LinkCandidate {
        raw_text: text.to_string(),
        kind,
    }
}

pub fn is_url(text: &str) -> bool {
    URL_WHOLE.is_match(text)
}

pub fn is_image(text: &str) -> bool {
    let text = text.trim();
    Url::parse(text)
        .or_else(|_| Url::parse(&format!("https://{text}")))
        .is_ok_and(|parsed| IMAGE.is_match(parsed.path()))
}

pub fn is_markdown_link(text: &str) -> bool {
    LINK_WHOLE.is_match(text)
}

/// The target URL of a `[label](url)` fragment.
pub fn extract_url(text: &str) -> Option<String> {
    LINK_WHOLE
        .captures(text)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Byte ranges of every markdown link in `line`, left to right.
pub(crate) fn link_ranges(line: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    LINK_LINE.find_iter(line).map(|m| (m.start(), m.end()))
}

/// Byte ranges of every bare URL in `line`, left to right. Trailing
/// sentence punctuation and an unbalanced closing paren are left out.
pub(crate) fn url_ranges(line: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    URL_LINE
        .find_iter(line)
        .map(|m| (m.start(), m.start() + trimmed_url_len(m.as_str())))
}

fn trimmed_url_len(url: &str) -> usize {
    let mut end = url;
    loop {
        if let Some(rest) = end.strip_suffix(['.', ',']) {
            end = rest;
        } else if end.ends_with(')') && end.matches(')').count() > end.matches('(').count() {
            end = &end[..end.len() - 1];
        } else {
            return end.len();
        }
    }
}

/// True when the two characters before `column` are `](`, i.e. the caret is
/// already inside a markdown link target.
pub fn follows_link_target(line: &str, column: usize) -> bool {
    column >= 2 && chars_before(line, column, 2) == "]("
}

/// True when the character before `column` is a quote, as in an `href="`.
pub fn follows_quote(line: &str, column: usize) -> bool {
    column >= 1 && matches!(chars_before(line, column, 1).as_str(), "\"" | "'")
}

fn chars_before(line: &str, column: usize, count: usize) -> String {
    line.chars().skip(column - count).take(count).collect()
}
