use scraper::{Html, Selector};
use url::Url;

/// Attribute some client-rendered pages put on an empty `<title>`.
const NO_TITLE_ATTR: &str = "no-title";

/// Text of the first `<title>` element, falling back to its `no-title`
/// attribute when the element is empty.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let element = document.select(&selector).next()?;

    let text = element.text().collect::<String>();
    let text = text.trim();
    if !text.is_empty() {
        return Some(text.to_string());
    }

    element
        .value()
        .attr(NO_TITLE_ATTR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// Title for a non-HTML resource: the last non-empty path segment, or
/// `"File"` when there is none.
pub fn file_name_title(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                .map(String::from)
        })
        .unwrap_or_else(|| "File".to_string())
}
