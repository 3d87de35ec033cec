//! Line/column coordinates and normalized spans.
//!
//! A [`Position`] is what the host editor hands out for carets: a 0-indexed
//! line and a column counted in `char`s from the start of that line. Ordering
//! is document order: line first, then column.

use recase_core::{
  chars::char_is_line_ending,
  line_ending::line_end_char_index,
};
use ropey::RopeSlice;

/// A caret location. Both fields are 0-based.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub line:   usize,
  pub column: usize,
}

impl Position {
  pub const fn new(line: usize, column: usize) -> Self {
    Self { line, column }
  }

  pub const fn zero() -> Self {
    Self { line: 0, column: 0 }
  }

  /// Same line, different column.
  #[must_use]
  pub const fn with_column(self, column: usize) -> Self {
    Self {
      line: self.line,
      column,
    }
  }

  /// The position reached after writing `text` starting at `self`.
  pub fn traverse(self, text: impl AsRef<str>) -> Self {
    let Self {
      mut line,
      mut column,
    } = self;
    let mut chars = text.as_ref().chars().peekable();

    while let Some(ch) = chars.next() {
      // The `\n` of a CRLF pair ends the line.
      if ch == '\r' && chars.peek() == Some(&'\n') {
        continue;
      }
      if char_is_line_ending(ch) {
        line += 1;
        column = 0;
      } else {
        column += 1;
      }
    }

    Self { line, column }
  }
}

impl From<(usize, usize)> for Position {
  fn from(value: (usize, usize)) -> Self {
    Position::new(value.0, value.1)
  }
}

/// An ordered range, `from <= to` in document order. Used for reading and
/// writing text, never for the selection the user sees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  pub from: Position,
  pub to:   Position,
}

impl Span {
  /// Builds a span from two positions in any order.
  pub fn new(a: Position, b: Position) -> Self {
    if a <= b {
      Self { from: a, to: b }
    } else {
      Self { from: b, to: a }
    }
  }

  #[inline]
  pub const fn point(pos: Position) -> Self {
    Self { from: pos, to: pos }
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.from == self.to
  }

  #[inline]
  pub fn contains(&self, pos: Position) -> bool {
    self.from <= pos && pos <= self.to
  }
}

/// Converts a character index into a [`Position`].
pub fn coords_at_pos(text: RopeSlice, pos: usize) -> Position {
  let pos = pos.min(text.len_chars());
  let line = text.char_to_line(pos);
  let line_start = text.line_to_char(line);
  Position::new(line, pos - line_start)
}

/// Converts a [`Position`] into a character index.
///
/// If `line` exceeds the number of lines, the last line is used.
/// If `column` runs past the line's content, the end of the line (before its
/// line ending) is used.
pub fn char_idx_at_coords(text: RopeSlice, coords: Position) -> usize {
  let line = coords.line.min(text.len_lines().saturating_sub(1));
  let line_start = text.line_to_char(line);
  let line_end = line_end_char_index(text, line);
  (line_start + coords.column).min(line_end)
}
