use super::buffer::{TextBuffer, position_at};
use crate::links::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The placeholder occupied this span and has been replaced.
    Replaced(Span),
    /// The placeholder is no longer in the buffer; nothing was changed.
    NotFound,
}

/// Span of the first occurrence of `token` in `text`.
pub fn locate(text: &str, token: &str) -> Option<Span> {
    if token.is_empty() {
        return None;
    }
    let start = text.find(token)?;
    Some(Span::new(
        position_at(text, start),
        position_at(text, start + token.len()),
    ))
}

/// Replace the first occurrence of `token` with `replacement`.
///
/// The buffer is read at call time; coordinates captured before the fetch
/// are never trusted since the user may have edited in between.
pub fn commit<B: TextBuffer + ?Sized>(buffer: &mut B, token: &str, replacement: &str) -> CommitOutcome {
    let snapshot = buffer.full_text();
    match locate(&snapshot, token) {
        Some(span) => {
            buffer.replace_range(replacement, span.start, span.end);
            CommitOutcome::Replaced(span)
        }
        None => {
            tracing::info!(token = %token, "placeholder no longer in buffer, dropping title");
            CommitOutcome::NotFound
        }
    }
}
