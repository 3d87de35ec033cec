use recase_core::chars::char_is_whitespace;

use crate::Tendril;

/// Words kept lowercase by title case unless they open or close the text.
pub const LOWERCASE_ARTICLES: &[&str] = &[
  "a", "an", "and", "as", "at", "but", "by", "for", "in", "nor", "of", "off", "on", "or", "per",
  "so", "the", "to", "up", "via", "yet",
];

pub fn to_upper_case(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  to_upper_case_with(text, &mut res);
  res
}

pub fn to_upper_case_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  text.for_each(|c| buf.extend(c.to_uppercase()));
}

pub fn to_lower_case(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  to_lower_case_with(text, &mut res);
  res
}

pub fn to_lower_case_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  text.for_each(|c| buf.extend(c.to_lowercase()));
}

pub fn to_title_case(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  to_title_case_with(text, &mut res);
  res
}

/// Capitalizes every whitespace-separated word, except listed articles that
/// are neither the first nor the last token. Whitespace runs are copied
/// verbatim.
///
/// Tokens alternate word, separator, word, ... and always start and end with a
/// word, which is empty when the text starts or ends with whitespace. So in
/// `" the end"` the leading empty word is the first token and `the` stays
/// lowercase.
pub fn to_title_case_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  let tokens = split_whitespace_runs(text);
  let last = tokens.len() - 1;

  for (index, token) in tokens.iter().enumerate() {
    match token {
      Token::Separator(sep) => buf.push_str(sep),
      Token::Word(word) => {
        let lower = to_lower_case(word.chars());
        if index > 0 && index < last && LOWERCASE_ARTICLES.contains(&lower.as_str()) {
          buf.push_str(&lower);
        } else {
          capitalize_with(word.chars(), buf);
        }
      },
    }
  }
}

pub fn to_sentence_case(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  to_sentence_case_with(text, &mut res);
  res
}

/// Uppercases the first character and lowercases everything after it.
pub fn to_sentence_case_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  capitalize_with(text, buf);
}

fn capitalize_with(mut text: impl Iterator<Item = char>, buf: &mut Tendril) {
  let Some(first) = text.next() else {
    return;
  };
  buf.extend(first.to_uppercase());
  to_lower_case_with(text, buf);
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
  Word(Tendril),
  Separator(Tendril),
}

fn split_whitespace_runs(text: impl Iterator<Item = char>) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut word = Tendril::new();
  let mut sep = Tendril::new();

  for c in text {
    if char_is_whitespace(c) {
      if sep.is_empty() {
        tokens.push(Token::Word(std::mem::take(&mut word)));
      }
      sep.push(c);
    } else {
      if !sep.is_empty() {
        tokens.push(Token::Separator(std::mem::take(&mut sep)));
      }
      word.push(c);
    }
  }

  if !sep.is_empty() {
    tokens.push(Token::Separator(sep));
  }
  tokens.push(Token::Word(word));
  tokens
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_to_upper_case() {
    assert_eq!(to_upper_case("hello".chars()).as_str(), "HELLO");
    assert_eq!(to_upper_case("Hello World".chars()).as_str(), "HELLO WORLD");
    assert_eq!(to_upper_case("ALREADY".chars()).as_str(), "ALREADY");
    assert_eq!(to_upper_case("".chars()).as_str(), "");
    assert_eq!(to_upper_case("café".chars()).as_str(), "CAFÉ");
    assert_eq!(to_upper_case("straße".chars()).as_str(), "STRASSE");
  }

  #[test]
  fn test_to_lower_case() {
    assert_eq!(to_lower_case("HELLO".chars()).as_str(), "hello");
    assert_eq!(to_lower_case("Hello World".chars()).as_str(), "hello world");
    assert_eq!(to_lower_case("already".chars()).as_str(), "already");
    assert_eq!(to_lower_case("".chars()).as_str(), "");
    assert_eq!(to_lower_case("CAFÉ".chars()).as_str(), "café");
  }

  #[test]
  fn test_to_title_case() {
    assert_eq!(to_title_case("the quick fox".chars()).as_str(), "The Quick Fox");
    assert_eq!(
      to_title_case("a tale of two cities".chars()).as_str(),
      "A Tale of Two Cities"
    );
    assert_eq!(
      to_title_case("WAR AND PEACE".chars()).as_str(),
      "War and Peace"
    );
    assert_eq!(to_title_case("hELLO".chars()).as_str(), "Hello");
    assert_eq!(to_title_case("éCOLE".chars()).as_str(), "École");
    assert_eq!(to_title_case("".chars()).as_str(), "");
  }

  #[test]
  fn test_title_case_first_and_last_articles() {
    assert_eq!(to_title_case("the end of the".chars()).as_str(), "The End of The");
    assert_eq!(to_title_case("of".chars()).as_str(), "Of");
  }

  #[test]
  fn test_title_case_keeps_separators() {
    assert_eq!(
      to_title_case("one  two\tthree\nfour".chars()).as_str(),
      "One  Two\tThree\nFour"
    );
    assert_eq!(to_title_case("   ".chars()).as_str(), "   ");
  }

  #[test]
  fn test_title_case_leading_whitespace() {
    // The empty leading word is the first token, so "the" is not first.
    assert_eq!(to_title_case(" the end".chars()).as_str(), " the End");
    assert_eq!(to_title_case("end of ".chars()).as_str(), "End of ");
  }

  #[test]
  fn test_to_sentence_case() {
    assert_eq!(
      to_sentence_case("the QUICK fox".chars()).as_str(),
      "The quick fox"
    );
    assert_eq!(to_sentence_case("Hello World".chars()).as_str(), "Hello world");
    assert_eq!(to_sentence_case("x".chars()).as_str(), "X");
    assert_eq!(to_sentence_case("".chars()).as_str(), "");
    assert_eq!(to_sentence_case(" lead".chars()).as_str(), " lead");
  }

  #[test]
  fn test_split_whitespace_runs() {
    assert_eq!(split_whitespace_runs("a  b".chars()), vec![
      Token::Word("a".into()),
      Token::Separator("  ".into()),
      Token::Word("b".into()),
    ]);
    assert_eq!(split_whitespace_runs(" a".chars()), vec![
      Token::Word("".into()),
      Token::Separator(" ".into()),
      Token::Word("a".into()),
    ]);
    assert_eq!(split_whitespace_runs("".chars()), vec![Token::Word("".into())]);
  }

  quickcheck::quickcheck! {
      fn title_case_preserves_whitespace(text: String) -> bool {
          let titled = to_title_case(text.chars());
          let original: Vec<char> = text.chars().filter(|c| char_is_whitespace(*c)).collect();
          let after: Vec<char> = titled.chars().filter(|c| char_is_whitespace(*c)).collect();
          original == after
      }
  }
}
