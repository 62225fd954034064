use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    BareUrl,
    MarkdownLink,
    Image,
    PlainText,
}

impl LinkKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BareUrl => "bare_url",
            Self::MarkdownLink => "markdown_link",
            Self::Image => "image",
            Self::PlainText => "plain_text",
        }
    }
}

/// A classified text fragment. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub raw_text: String,
    pub kind: LinkKind,
}

impl LinkCandidate {
    /// Whether a title fetch makes sense for this fragment.
    pub fn wants_title(&self) -> bool {
        matches!(self.kind, LinkKind::BareUrl | LinkKind::MarkdownLink)
    }
}

/// A buffer coordinate. `column` counts Unicode scalar values within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Same span with `start <= end`.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }
}
