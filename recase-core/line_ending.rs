//! Line breaks as the rope counts them.
//!
//! `ropey` is built with `cr_lines` and without `unicode_lines`, so a line
//! ends at LF, CRLF or a lone CR and nowhere else.

use ropey::RopeSlice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
  Crlf,
  LF,
  CR,
}

impl LineEnding {
  pub const fn len_chars(self) -> usize {
    match self {
      Self::Crlf => 2,
      Self::LF | Self::CR => 1,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Crlf => "\r\n",
      Self::LF => "\n",
      Self::CR => "\r",
    }
  }

  /// The single-char ending `ch` starts or finishes, if any.
  pub const fn from_char(ch: char) -> Option<Self> {
    match ch {
      '\n' => Some(Self::LF),
      '\r' => Some(Self::CR),
      _ => None,
    }
  }
}

/// How `text` ends, CRLF taking precedence over its trailing LF.
pub fn trailing_line_ending(text: RopeSlice) -> Option<LineEnding> {
  let mut chars = text.chars_at(text.len_chars());
  match LineEnding::from_char(chars.prev()?)? {
    LineEnding::LF if chars.prev() == Some('\r') => Some(LineEnding::Crlf),
    ending => Some(ending),
  }
}

/// Char index just past the content of `line`, before its line ending.
pub fn line_end_char_index(text: RopeSlice, line: usize) -> usize {
  let next_line_start = text.line_to_char(line + 1);
  let ending = trailing_line_ending(text.line(line)).map_or(0, LineEnding::len_chars);
  next_line_start - ending
}
