use crate::error::BufferError;
use crate::links::{Position, Span};

/// The live text surface a conversion writes into.
///
/// Positions are `(line, column)` pairs; lines are separated by `\n` and
/// columns count Unicode scalar values.
pub trait TextBuffer: Send {
    fn cursor(&self) -> Position;

    fn selection_span(&self) -> Span;

    fn selection(&self) -> String;

    fn set_selection(&mut self, span: Span);

    /// Replace the selection (or insert at the caret) and leave the caret
    /// after the inserted text.
    fn replace_selection(&mut self, text: &str);

    fn replace_range(&mut self, text: &str, from: Position, to: Position);

    fn full_text(&self) -> String;

    fn line(&self, n: usize) -> Option<String>;

    fn something_selected(&self) -> bool {
        !self.selection_span().is_empty()
    }
}

/// Line/column of byte `offset` in `text`. `offset` must sit on a char
/// boundary.
pub fn position_at(text: &str, offset: usize) -> Position {
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Position::new(line, before[line_start..].chars().count())
}

/// Byte offset of `pos` in `text`. The column may equal the line length.
pub fn offset_of(text: &str, pos: Position) -> Result<usize, BufferError> {
    let out_of_range = || BufferError::OutOfRange {
        line: pos.line,
        column: pos.column,
    };

    let line_start = if pos.line == 0 {
        0
    } else {
        text.match_indices('\n')
            .nth(pos.line - 1)
            .map(|(i, _)| i + 1)
            .ok_or_else(out_of_range)?
    };
    let line = text[line_start..].split('\n').next().unwrap_or_default();

    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(pos.column)
        .map(|i| line_start + i)
        .ok_or_else(out_of_range)
}

/// In-memory [`TextBuffer`] used by the CLI and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBuffer {
    text: String,
    anchor: Position,
    head: Position,
}

impl MemoryBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cursor(mut self, pos: Position) -> Self {
        self.set_cursor(pos);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, span: Span) -> Self {
        self.set_selection(span);
        self
    }

    pub fn set_cursor(&mut self, pos: Position) {
        self.anchor = pos;
        self.head = pos;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Insert `text` at `pos`, as a user typing elsewhere in the buffer would.
    pub fn insert_at(&mut self, pos: Position, text: &str) {
        self.replace_range(text, pos, pos);
    }

    /// Nearest valid offset: past-the-end columns snap to the line end and
    /// past-the-end lines to the buffer end.
    fn clamped_offset(&self, pos: Position) -> usize {
        offset_of(&self.text, pos).unwrap_or_else(|_| match self.line(pos.line) {
            Some(line) => {
                let end = Position::new(pos.line, line.chars().count());
                offset_of(&self.text, end).unwrap_or(self.text.len())
            }
            None => self.text.len(),
        })
    }

    fn edit(&mut self, start: usize, end: usize, text: &str) {
        let anchor = self.clamped_offset(self.anchor);
        let head = self.clamped_offset(self.head);

        self.text.replace_range(start..end, text);

        let shift = |offset: usize| {
            if offset >= end {
                offset - (end - start) + text.len()
            } else if offset > start {
                start + text.len()
            } else {
                offset
            }
        };
        self.anchor = position_at(&self.text, shift(anchor));
        self.head = position_at(&self.text, shift(head));
    }
}

impl TextBuffer for MemoryBuffer {
    fn cursor(&self) -> Position {
        self.head
    }

    fn selection_span(&self) -> Span {
        Span::new(self.anchor, self.head).normalized()
    }

    fn selection(&self) -> String {
        let span = self.selection_span();
        let start = self.clamped_offset(span.start);
        let end = self.clamped_offset(span.end);
        self.text[start..end].to_string()
    }

    fn set_selection(&mut self, span: Span) {
        self.anchor = span.start;
        self.head = span.end;
    }

    fn replace_selection(&mut self, text: &str) {
        let span = self.selection_span();
        let start = self.clamped_offset(span.start);
        let end = self.clamped_offset(span.end);
        self.text.replace_range(start..end, text);
        self.set_cursor(position_at(&self.text, start + text.len()));
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        let span = Span::new(from, to).normalized();
        let start = self.clamped_offset(span.start);
        let end = self.clamped_offset(span.end);
        self.edit(start, end, text);
    }

    fn full_text(&self) -> String {
        self.text.clone()
    }

    fn line(&self, n: usize) -> Option<String> {
        self.text.split('\n').nth(n).map(String::from)
    }
}
