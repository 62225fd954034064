pub mod classifier;
pub mod placeholder;
pub mod span;
pub mod types;

pub use classifier::{classify, extract_url, is_image, is_markdown_link, is_url};
pub use placeholder::TokenStrategy;
pub use types::{LinkCandidate, LinkKind, Position, Span};
