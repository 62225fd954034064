use super::classifier::{link_ranges, url_ranges};
use super::types::{Position, Span};
use crate::editor::TextBuffer;

/// Find the link token the cursor sits in.
///
/// Markdown links are tried before bare URLs, each scanned left to right;
/// the first match whose bounds contain the cursor (inclusive on both ends)
/// wins. When nothing contains the cursor the result is the zero-width span
/// at the cursor itself.
pub fn resolve<B: TextBuffer + ?Sized>(buffer: &B, cursor: Position) -> Span {
    match buffer.line(cursor.line) {
        Some(line) => resolve_in_line(&line, cursor),
        None => Span::caret(cursor),
    }
}

pub fn resolve_in_line(line: &str, cursor: Position) -> Span {
    let containing = |(start, end): (usize, usize)| {
        let start_col = line[..start].chars().count();
        let end_col = start_col + line[start..end].chars().count();
        (start_col <= cursor.column && cursor.column <= end_col).then(|| {
            Span::new(
                Position::new(cursor.line, start_col),
                Position::new(cursor.line, end_col),
            )
        })
    };

    link_ranges(line)
        .find_map(containing)
        .or_else(|| url_ranges(line).find_map(containing))
        .unwrap_or_else(|| Span::caret(cursor))
}
