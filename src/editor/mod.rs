pub mod buffer;
pub mod clipboard;
pub mod engine;
pub mod notice;
pub mod patcher;

pub use buffer::{MemoryBuffer, TextBuffer};
pub use clipboard::{ClipboardSource, StaticClipboard};
pub use engine::{
    Command, ConversionOutcome, DropEvent, HookDecision, LinkTitleEngine, PasteEvent, PendingTitle,
    Staged, render_link,
};
pub use notice::{Notifier, TracingNotifier};
pub use patcher::CommitOutcome;
