use super::buffer::TextBuffer;
use super::clipboard::ClipboardSource;
use super::notice::Notifier;
use super::patcher::{self, CommitOutcome};
use crate::config::Configuration;
use crate::links::classifier::{follows_link_target, follows_quote};
use crate::links::{LinkKind, Span, classify, extract_url, is_image, span};
use crate::title::{DomainPolicy, HttpClient, TitleFetcher, TitleOrigin, postprocess};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Commands offered to the host's palette and keybinding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PasteWithTitle,
    NormalPaste,
    EnhanceUrl,
}

impl Command {
    pub const ALL: [Command; 3] = [Self::PasteWithTitle, Self::NormalPaste, Self::EnhanceUrl];

    pub fn id(self) -> &'static str {
        match self {
            Self::PasteWithTitle => "paste-url-with-title",
            Self::NormalPaste => "normal-paste",
            Self::EnhanceUrl => "enhance-url-with-title",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PasteWithTitle => "Paste URL and auto fetch title",
            Self::NormalPaste => "Normal paste (no fetching behavior)",
            Self::EnhanceUrl => "Enhance existing URL with link and title",
        }
    }
}

/// A placeholder that is in the buffer and waiting for its title.
#[derive(Debug, Clone)]
pub struct PendingTitle {
    pub token: String,
    pub url: String,
    /// Settings captured when the placeholder was written.
    pub config: Configuration,
}

/// What the synchronous half of a conversion did to the buffer.
#[derive(Debug, Clone)]
pub enum Staged {
    /// No link under consideration; buffer untouched.
    Nothing,
    /// Text inserted as-is.
    Verbatim,
    /// Final link written without fetching.
    Linked,
    /// Placeholder written; finish with [`LinkTitleEngine::finish_conversion`].
    Pending(PendingTitle),
}

impl Staged {
    pub fn into_pending(self) -> Option<PendingTitle> {
        match self {
            Self::Pending(pending) => Some(pending),
            Self::Nothing | Self::Verbatim | Self::Linked => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    Nothing,
    Verbatim,
    Linked,
    /// Fetched title written where the placeholder was.
    Titled(Span),
    /// The placeholder was gone when the title arrived.
    PlaceholderLost,
}

/// Answer to a paste or drop hook. `PassThrough` leaves the event to the
/// host's default handling; `Handled` means the engine wrote to the buffer.
#[derive(Debug, Clone)]
pub enum HookDecision {
    PassThrough,
    Handled(Option<PendingTitle>),
}

#[derive(Debug, Clone, Default)]
pub struct PasteEvent {
    pub text: Option<String>,
    pub has_files: bool,
}

/// A drop; the host moves the selection to the drop point before the hook.
#[derive(Debug, Clone, Default)]
pub struct DropEvent {
    pub text: Option<String>,
}

pub fn render_link(label: &str, url: &str, html: bool) -> String {
    if html {
        format!(r#"<a href="{}">{label}</a>"#, escape_href(url))
    } else {
        format!("[{label}]({url})")
    }
}

fn escape_href(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Drives conversions against a shared buffer.
///
/// Each conversion mutates the buffer twice, once to write a placeholder
/// and once to replace it, with the title fetch in between. The buffer lock
/// is only held for those two synchronous steps, so the user (and other
/// conversions) may edit freely while a fetch is outstanding.
pub struct LinkTitleEngine<C> {
    fetcher: TitleFetcher<C>,
}

impl<C: HttpClient> LinkTitleEngine<C> {
    pub fn new(client: C, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            fetcher: TitleFetcher::new(client, notifier),
        }
    }

    pub fn fetcher(&self) -> &TitleFetcher<C> {
        &self.fetcher
    }

    pub async fn run<B: TextBuffer + ?Sized>(
        &self,
        command: Command,
        buffer: &Mutex<B>,
        clipboard: &dyn ClipboardSource,
        config: &Configuration,
    ) -> ConversionOutcome {
        tracing::debug!(command = command.id(), "running command");
        match command {
            Command::PasteWithTitle => self.paste_url_with_title(buffer, clipboard, config).await,
            Command::NormalPaste => self.normal_paste(buffer, clipboard).await,
            Command::EnhanceUrl => self.enhance_selected_url(buffer, config).await,
        }
    }

    pub async fn paste_url_with_title<B: TextBuffer + ?Sized>(
        &self,
        buffer: &Mutex<B>,
        clipboard: &dyn ClipboardSource,
        config: &Configuration,
    ) -> ConversionOutcome {
        let Some(text) = clipboard.read_text().await.filter(|t| !t.is_empty()) else {
            return ConversionOutcome::Nothing;
        };

        let staged = {
            let mut buf = buffer.lock().await;
            self.stage_paste(&mut *buf, &text, config).unwrap_or_else(|| {
                buf.replace_selection(&text);
                Staged::Verbatim
            })
        };
        self.settle(buffer, staged).await
    }

    pub async fn normal_paste<B: TextBuffer + ?Sized>(
        &self,
        buffer: &Mutex<B>,
        clipboard: &dyn ClipboardSource,
    ) -> ConversionOutcome {
        let Some(text) = clipboard.read_text().await.filter(|t| !t.is_empty()) else {
            return ConversionOutcome::Nothing;
        };
        buffer.lock().await.replace_selection(&text);
        ConversionOutcome::Verbatim
    }

    /// Turn the URL or markdown link under the selection (or cursor) into a
    /// link with a freshly fetched title.
    pub async fn enhance_selected_url<B: TextBuffer + ?Sized>(
        &self,
        buffer: &Mutex<B>,
        config: &Configuration,
    ) -> ConversionOutcome {
        let staged = {
            let mut buf = buffer.lock().await;
            self.stage_enhance(&mut *buf, config)
        };
        self.settle(buffer, staged).await
    }

    pub fn on_paste<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        event: &PasteEvent,
        config: &Configuration,
    ) -> HookDecision {
        if !config.enhance_on_paste || event.has_files {
            return HookDecision::PassThrough;
        }
        let Some(text) = event.text.as_deref().filter(|t| !t.trim().is_empty()) else {
            return HookDecision::PassThrough;
        };

        match self.stage_paste(buffer, text, config) {
            Some(staged) => HookDecision::Handled(staged.into_pending()),
            None => HookDecision::PassThrough,
        }
    }

    pub fn on_drop<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        event: &DropEvent,
        config: &Configuration,
    ) -> HookDecision {
        if !config.enhance_on_drop {
            return HookDecision::PassThrough;
        }
        let Some(url) = event.text.as_deref().map(str::trim) else {
            return HookDecision::PassThrough;
        };
        if classify(url).kind != LinkKind::BareUrl {
            return HookDecision::PassThrough;
        }

        HookDecision::Handled(self.begin_conversion(buffer, url, config).into_pending())
    }

    /// Write the link for `url` over the current selection: the final link
    /// for blacklisted hosts, otherwise a placeholder to be replaced later.
    pub fn begin_conversion<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        url: &str,
        config: &Configuration,
    ) -> Staged {
        let policy = DomainPolicy::from_config(config);
        if let Some(host) = policy.blocked_host(url) {
            buffer.replace_selection(&render_link(&host, url, config.html_link));
            return Staged::Linked;
        }

        let token = config.token_strategy.generate(&config.placeholder_text);
        buffer.replace_selection(&render_link(&token, url, config.html_link));
        tracing::info!(url = %url, "fetching title");

        Staged::Pending(PendingTitle {
            token,
            url: url.to_string(),
            config: config.clone(),
        })
    }

    /// Fetch the title for a pending placeholder and write it in place.
    pub async fn finish_conversion<B: TextBuffer + ?Sized>(
        &self,
        buffer: &Mutex<B>,
        pending: PendingTitle,
    ) -> CommitOutcome {
        let title = self.title_for(&pending.url, &pending.config).await;
        let mut buf = buffer.lock().await;
        patcher::commit(&mut *buf, &pending.token, &title)
    }

    /// The label text a link to `url` should end up with.
    pub async fn title_for(&self, url: &str, config: &Configuration) -> String {
        let policy = DomainPolicy::from_config(config);
        let result = self.fetcher.fetch(url, &policy, config).await;
        match result.origin {
            TitleOrigin::Blacklisted => result.title,
            _ => postprocess::process(&result.title, url, &policy, config.max_title_length),
        }
    }

    /// Paste-time decision shared by the command and the paste hook.
    /// `None` means the text should go in as a normal paste.
    fn stage_paste<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        text: &str,
        config: &Configuration,
    ) -> Option<Staged> {
        let url = text.trim();
        let candidate = classify(url);
        // Image URLs have no meaningful title to fetch.
        if candidate.kind != LinkKind::BareUrl {
            tracing::debug!(kind = candidate.kind.as_str(), "pasting as plain text");
            return None;
        }

        if config.preserve_selection_as_title {
            let selected = buffer.selection();
            let selected = selected.trim();
            if !selected.is_empty() {
                let label = postprocess::escape_markdown(&postprocess::unescape_markdown(selected));
                buffer.replace_selection(&render_link(&label, url, config.html_link));
                return Some(Staged::Linked);
            }
        }

        if inside_link_target(&*buffer) {
            return None;
        }

        Some(self.begin_conversion(buffer, url, config))
    }

    fn stage_enhance<B: TextBuffer + ?Sized>(&self, buffer: &mut B, config: &Configuration) -> Staged {
        if !buffer.something_selected() {
            let found = span::resolve(&*buffer, buffer.cursor());
            buffer.set_selection(found);
        }

        let selected = buffer.selection();
        let candidate = classify(selected.trim());
        if !candidate.wants_title() {
            tracing::debug!(kind = candidate.kind.as_str(), "nothing to enhance");
            return Staged::Nothing;
        }
        let url = match candidate.kind {
            LinkKind::BareUrl => candidate.raw_text,
            LinkKind::MarkdownLink => match extract_url(&candidate.raw_text) {
                Some(url) if !is_image(&url) => url,
                _ => return Staged::Nothing,
            },
            LinkKind::Image | LinkKind::PlainText => return Staged::Nothing,
        };

        self.begin_conversion(buffer, &url, config)
    }

    async fn settle<B: TextBuffer + ?Sized>(&self, buffer: &Mutex<B>, staged: Staged) -> ConversionOutcome {
        match staged {
            Staged::Nothing => ConversionOutcome::Nothing,
            Staged::Verbatim => ConversionOutcome::Verbatim,
            Staged::Linked => ConversionOutcome::Linked,
            Staged::Pending(pending) => match self.finish_conversion(buffer, pending).await {
                CommitOutcome::Replaced(span) => ConversionOutcome::Titled(span),
                CommitOutcome::NotFound => ConversionOutcome::PlaceholderLost,
            },
        }
    }
}

/// Caret directly after `](` or a quote: the URL is going into an existing
/// link target or attribute and must stay bare.
fn inside_link_target<B: TextBuffer + ?Sized>(buffer: &B) -> bool {
    let at = buffer.selection_span().start;
    buffer
        .line(at.line)
        .is_some_and(|line| follows_link_target(&line, at.column) || follows_quote(&line, at.column))
}
