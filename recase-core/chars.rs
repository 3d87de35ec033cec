use unicode_general_category::{
  GeneralCategory,
  get_general_category,
};

use crate::line_ending::LineEnding;

#[derive(Debug, Eq, PartialEq)]
pub enum CharCategory {
  Letter,
  Mark,
  Whitespace,
  Eol,
  Other,
}

pub fn categorize_char(ch: char) -> CharCategory {
  match ch {
    c if char_is_line_ending(c) => CharCategory::Eol,
    c if char_is_whitespace(c) => CharCategory::Whitespace,
    c if char_is_letter(c) => CharCategory::Letter,
    c if char_is_mark(c) => CharCategory::Mark,
    _ => CharCategory::Other,
  }
}

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

/// Whitespace as used to split words for title case. Line endings count too.
///
/// The Unicode `White_Space` set plus BOM, without NEXT LINE (U+0085), the
/// same set a JavaScript `\s` matches.
#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  (ch.is_whitespace() && ch != '\u{0085}') || ch == '\u{FEFF}'
}

/// Any character in the Unicode `L` categories.
#[inline]
pub fn char_is_letter(ch: char) -> bool {
  matches!(
    get_general_category(ch),
    GeneralCategory::UppercaseLetter
      | GeneralCategory::LowercaseLetter
      | GeneralCategory::TitlecaseLetter
      | GeneralCategory::ModifierLetter
      | GeneralCategory::OtherLetter
  )
}

/// Any character in the Unicode `M` categories (combining marks).
#[inline]
pub fn char_is_mark(ch: char) -> bool {
  matches!(
    get_general_category(ch),
    GeneralCategory::NonspacingMark | GeneralCategory::SpacingMark | GeneralCategory::EnclosingMark
  )
}
