use super::policy::DomainPolicy;
use crate::config::TitleTemplate;
use regex::Regex;
use std::sync::LazyLock;

/// Characters with meaning inside a markdown link label.
const MARKDOWN_CONTROL: &[char] = &['*', '_', '`', '~', '\\', '[', ']', '<', '>', '|'];

static ESCAPED_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\([*_`~\\\[\]<>|])")
        .unwrap_or_else(|e| panic!("escape pattern must compile: {e}"))
});

static GROUP_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\d+)").unwrap_or_else(|e| panic!("group pattern must compile: {e}"))
});

/// Turn a raw fetched title into link label text.
///
/// Line breaks are stripped, markdown control characters escaped exactly
/// once, the first matching domain template applied, then the result is
/// truncated to `max_title_length`.
pub fn process(raw: &str, url: &str, policy: &DomainPolicy, max_title_length: usize) -> String {
    let title = strip_line_breaks(raw);
    let title = escape_markdown(&unescape_markdown(&title));
    let title = match policy.template_for(url) {
        Some(template) => apply_template(&title, template),
        None => title,
    };
    truncate(&title, max_title_length)
}

pub fn strip_line_breaks(text: &str) -> String {
    text.replace(['\r', '\n'], "").trim().to_string()
}

pub fn unescape_markdown(text: &str) -> String {
    ESCAPED_CONTROL.replace_all(text, "$1").into_owned()
}

pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_CONTROL.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Replace the first match of the template's pattern. An invalid pattern
/// leaves the title untouched.
pub fn apply_template(title: &str, template: &TitleTemplate) -> String {
    let search = match Regex::new(&template.search) {
        Ok(search) => search,
        Err(e) => {
            tracing::warn!(domain = %template.domain, error = %e, "invalid title template pattern");
            return title.to_string();
        }
    };
    // `$1x` must mean group 1 followed by `x`, so pin group numbers in braces.
    let replace = GROUP_REF.replace_all(&template.replace, "$${${1}}");
    search.replace(title, replace.as_ref()).into_owned()
}

/// Cut to `max` characters plus `...`; `max == 0` disables truncation.
pub fn truncate(title: &str, max: usize) -> String {
    if max == 0 || title.chars().count() <= max {
        return title.to_string();
    }
    let mut shortened: String = title.chars().take(max).collect();
    shortened.push_str("...");
    shortened
}
