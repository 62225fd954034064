use crate::conversion_harness::{ScriptedClient, engine};
use autolink_title::editor::{
    Command, ConversionOutcome, HookDecision, MemoryBuffer, PasteEvent, StaticClipboard,
};
use autolink_title::links::placeholder::visible_text;
use autolink_title::links::{Position, TokenStrategy};
use autolink_title::Configuration;
use regex::Regex;
use tokio::sync::Mutex;

fn paste_event(text: &str) -> PasteEvent {
    PasteEvent {
        text: Some(text.into()),
        has_files: false,
    }
}

#[tokio::test]
async fn pasted_url_shows_placeholder_then_title() {
    let engine = engine(ScriptedClient::new().page("https://example.com", "Example Domain"));
    let config = Configuration::default();
    let buffer = Mutex::new(MemoryBuffer::new(""));

    let decision = {
        let mut buf = buffer.lock().await;
        engine.on_paste(&mut *buf, &paste_event("https://example.com"), &config)
    };
    let HookDecision::Handled(Some(pending)) = decision else {
        panic!("paste should be handled with a pending title");
    };

    let placeholder = Regex::new(r"^\[Fetching Title#[a-z0-9]{4}\]\(https://example\.com\)$").unwrap();
    assert!(placeholder.is_match(buffer.lock().await.text()));

    engine.finish_conversion(&buffer, pending).await;
    assert_eq!(
        buffer.lock().await.text(),
        "[Example Domain](https://example.com)"
    );
}

#[tokio::test]
async fn paste_command_runs_to_completion() {
    let engine = engine(ScriptedClient::new().page("https://example.com", "Example Domain"));
    let buffer = Mutex::new(MemoryBuffer::new("Links:\n- ").with_cursor(Position::new(1, 2)));
    let clipboard = StaticClipboard::new("https://example.com");

    let outcome = engine
        .run(Command::PasteWithTitle, &buffer, &clipboard, &Configuration::default())
        .await;

    assert!(matches!(outcome, ConversionOutcome::Titled(_)));
    assert_eq!(
        buffer.lock().await.text(),
        "Links:\n- [Example Domain](https://example.com)"
    );
}

#[tokio::test]
async fn paste_command_inserts_plain_text_verbatim() {
    let client = ScriptedClient::new();
    let engine = engine(client);
    let buffer = Mutex::new(MemoryBuffer::new(""));
    let clipboard = StaticClipboard::new("not a link at all");

    let outcome = engine
        .paste_url_with_title(&buffer, &clipboard, &Configuration::default())
        .await;

    assert_eq!(outcome, ConversionOutcome::Verbatim);
    assert_eq!(buffer.lock().await.text(), "not a link at all");
    assert!(engine.fetcher().client().calls().is_empty());
}

#[tokio::test]
async fn image_url_is_pasted_without_fetching() {
    let engine = engine(ScriptedClient::new());
    let buffer = Mutex::new(MemoryBuffer::new(""));
    let clipboard = StaticClipboard::new("https://example.com/cat.jpg");

    let outcome = engine
        .paste_url_with_title(&buffer, &clipboard, &Configuration::default())
        .await;

    assert_eq!(outcome, ConversionOutcome::Verbatim);
    assert_eq!(buffer.lock().await.text(), "https://example.com/cat.jpg");
    assert!(engine.fetcher().client().calls().is_empty());
}

#[tokio::test]
async fn normal_paste_never_fetches() {
    let engine = engine(ScriptedClient::new());
    let buffer = Mutex::new(MemoryBuffer::new(""));
    let clipboard = StaticClipboard::new("https://example.com");

    let outcome = engine
        .run(Command::NormalPaste, &buffer, &clipboard, &Configuration::default())
        .await;

    assert_eq!(outcome, ConversionOutcome::Verbatim);
    assert_eq!(buffer.lock().await.text(), "https://example.com");
    assert!(engine.fetcher().client().calls().is_empty());
}

#[tokio::test]
async fn empty_clipboard_does_nothing() {
    let engine = engine(ScriptedClient::new());
    let buffer = Mutex::new(MemoryBuffer::new("keep"));

    let outcome = engine
        .paste_url_with_title(&buffer, &StaticClipboard::empty(), &Configuration::default())
        .await;

    assert_eq!(outcome, ConversionOutcome::Nothing);
    assert_eq!(buffer.lock().await.text(), "keep");
}

#[tokio::test]
async fn paste_after_link_target_stays_bare() {
    let engine = engine(ScriptedClient::new());
    let buffer = Mutex::new(MemoryBuffer::new("[docs](").with_cursor(Position::new(0, 7)));
    let clipboard = StaticClipboard::new("https://docs.rs");

    let outcome = engine
        .paste_url_with_title(&buffer, &clipboard, &Configuration::default())
        .await;

    assert_eq!(outcome, ConversionOutcome::Verbatim);
    assert_eq!(buffer.lock().await.text(), "[docs](https://docs.rs");
}

#[tokio::test]
async fn title_is_escaped() {
    let engine = engine(ScriptedClient::new().page("https://example.com", "[Draft] my_notes"));
    let buffer = Mutex::new(MemoryBuffer::new(""));

    engine
        .paste_url_with_title(
            &buffer,
            &StaticClipboard::new("https://example.com"),
            &Configuration::default(),
        )
        .await;

    assert_eq!(
        buffer.lock().await.text(),
        r"[\[Draft\] my\_notes](https://example.com)"
    );
}

#[tokio::test]
async fn long_title_is_truncated() {
    let engine = engine(ScriptedClient::new().page("https://example.com", "Hello World Again"));
    let buffer = Mutex::new(MemoryBuffer::new(""));
    let config = Configuration {
        max_title_length: 10,
        ..Configuration::default()
    };

    engine
        .paste_url_with_title(&buffer, &StaticClipboard::new("https://example.com"), &config)
        .await;

    assert_eq!(
        buffer.lock().await.text(),
        "[Hello Worl...](https://example.com)"
    );
}

#[tokio::test]
async fn unlimited_length_keeps_long_titles() {
    let long_title = "A very long page title ".repeat(20);
    let engine = engine(ScriptedClient::new().page("https://example.com", &long_title));
    let buffer = Mutex::new(MemoryBuffer::new(""));

    engine
        .paste_url_with_title(
            &buffer,
            &StaticClipboard::new("https://example.com"),
            &Configuration::default(),
        )
        .await;

    assert_eq!(
        buffer.lock().await.text(),
        format!("[{}](https://example.com)", long_title.trim())
    );
}

#[tokio::test]
async fn invisible_placeholder_settles_to_title() {
    let engine = engine(ScriptedClient::new().page("https://example.com", "Example Domain"));
    let config = Configuration {
        token_strategy: TokenStrategy::Invisible,
        ..Configuration::default()
    };
    let buffer = Mutex::new(MemoryBuffer::new(""));

    let pending = {
        let mut buf = buffer.lock().await;
        engine
            .begin_conversion(&mut *buf, "https://example.com", &config)
            .into_pending()
            .unwrap()
    };
    let shown = visible_text(buffer.lock().await.text());
    assert_eq!(shown, "[Fetching Title](https://example.com)");

    engine.finish_conversion(&buffer, pending).await;
    assert_eq!(
        buffer.lock().await.text(),
        "[Example Domain](https://example.com)"
    );
}

#[tokio::test]
async fn html_links_when_configured() {
    let engine = engine(ScriptedClient::new().page("https://example.com", "Example Domain"));
    let buffer = Mutex::new(MemoryBuffer::new(""));
    let config = Configuration {
        html_link: true,
        ..Configuration::default()
    };

    engine
        .paste_url_with_title(&buffer, &StaticClipboard::new("https://example.com"), &config)
        .await;

    assert_eq!(
        buffer.lock().await.text(),
        r#"<a href="https://example.com">Example Domain</a>"#
    );
}

#[tokio::test]
async fn unreachable_site_still_resolves_placeholder() {
    let engine = engine(ScriptedClient::new());
    let buffer = Mutex::new(MemoryBuffer::new(""));

    let outcome = engine
        .paste_url_with_title(
            &buffer,
            &StaticClipboard::new("https://offline.example.com"),
            &Configuration::default(),
        )
        .await;

    assert!(matches!(outcome, ConversionOutcome::Titled(_)));
    assert_eq!(
        buffer.lock().await.text(),
        "[Site Unreachable](https://offline.example.com)"
    );
}

#[tokio::test]
async fn host_with_image_like_tld_is_fetched() {
    let engine = engine(ScriptedClient::new().page("https://character.ai", "Character AI"));
    let buffer = Mutex::new(MemoryBuffer::new(""));

    let outcome = engine
        .paste_url_with_title(
            &buffer,
            &StaticClipboard::new("https://character.ai"),
            &Configuration::default(),
        )
        .await;

    assert!(matches!(outcome, ConversionOutcome::Titled(_)));
    assert_eq!(
        buffer.lock().await.text(),
        "[Character AI](https://character.ai)"
    );
}
