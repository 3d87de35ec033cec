//! The word under a caret.
//!
//! A word here is a maximal run of Unicode letters, each optionally followed
//! by combining marks. Digits, underscores and punctuation end a word; there
//! is no notion of syntax-aware identifiers.

use recase_core::chars::{
  CharCategory,
  categorize_char,
  char_is_letter,
  char_is_mark,
};

use crate::position::{
  Position,
  Span,
};

/// Finds the run of letters touching `pos` on `line` (the text of
/// `pos.line`, without its line ending).
///
/// Scans left while the preceding character belongs to a word and right while
/// the current one does. When no letter touches the position the result is a
/// zero-width span at `pos`.
pub fn word_span_at(pos: Position, line: &str) -> Span {
  let chars: Vec<char> = line.chars().collect();
  let column = pos.column.min(chars.len());

  let mut start = column;
  while start > 0 && char_is_word_part(chars[start - 1]) {
    start -= 1;
  }
  // Marks only extend a word, they never start one.
  while start < column && char_is_mark(chars[start]) {
    start += 1;
  }

  let mut end = column;
  while end < chars.len() && (char_is_letter(chars[end]) || (end > start && char_is_mark(chars[end])))
  {
    end += 1;
  }

  if start == end {
    return Span::point(pos);
  }

  Span {
    from: pos.with_column(start),
    to:   pos.with_column(end),
  }
}

#[inline]
fn char_is_word_part(ch: char) -> bool {
  matches!(categorize_char(ch), CharCategory::Letter | CharCategory::Mark)
}
