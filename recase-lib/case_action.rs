//! Changing the case of one selection.
//!
//! An empty selection (a caret, or a selection over nothing) acts on the word
//! under its head instead. The replacement is only written when it differs
//! from the current text.
//!
//! The selection handed back covers the replacement when text was selected,
//! keeping the original direction. A caret stays where it was, pulled back to
//! the end of the word if the word got shorter.

use std::{
  fmt,
  str::FromStr,
};

use crate::{
  cycle::{
    CaseCycle,
    CaseKind,
    CycleContext,
  },
  editor::EditorHost,
  position::Span,
  selection::Selection,
  word::word_span_at,
};

/// What to do with the text of each selection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseAction {
  /// Move one step through the case cycle.
  #[default]
  Next,
  Upper,
  Lower,
  Title,
  Sentence,
}

impl CaseAction {
  /// The fixed case this action converts to, `None` for cycling.
  pub const fn kind(self) -> Option<CaseKind> {
    match self {
      Self::Next => None,
      Self::Upper => Some(CaseKind::Upper),
      Self::Lower => Some(CaseKind::Lower),
      Self::Title => Some(CaseKind::Title),
      Self::Sentence => Some(CaseKind::Sentence),
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Next => "next",
      Self::Upper => "upper",
      Self::Lower => "lower",
      Self::Title => "title",
      Self::Sentence => "sentence",
    }
  }
}

impl fmt::Display for CaseAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown case action `{0}`")]
pub struct ParseCaseActionError(String);

impl FromStr for CaseAction {
  type Err = ParseCaseActionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "next" | "cycle" | "toggle" => Ok(Self::Next),
      "upper" | "uppercase" => Ok(Self::Upper),
      "lower" | "lowercase" => Ok(Self::Lower),
      "title" => Ok(Self::Title),
      "sentence" => Ok(Self::Sentence),
      _ => Err(ParseCaseActionError(s.to_string())),
    }
  }
}

/// Applies `action` to one selection of `host` and returns the selection to
/// install in its place, along with the context for the next selection.
pub fn transform_case<H: EditorHost>(
  host: &mut H,
  selection: Selection,
  action: CaseAction,
  cycle: &CaseCycle,
  context: CycleContext,
) -> Result<(Selection, CycleContext), H::Error> {
  let mut span = selection.span();
  let mut selected = host.text_in(span).into_owned();
  let on_word = selected.is_empty();
  if on_word {
    let head = selection.head;
    span = word_span_at(head, &host.line(head.line));
    selected = host.text_in(span).into_owned();
  }

  let (replacement, context) = match action.kind() {
    Some(kind) => (kind.apply(&selected), context),
    None => {
      let step = cycle.advance(context, &selected);
      tracing::trace!(target_case = ?step.target, "cycling case");
      (step.replacement, step.context)
    },
  };

  if replacement.as_str() != selected {
    host.replace_range(span, &replacement)?;
  }

  let end = span.from.traverse(&replacement);
  let next = if on_word {
    let head = selection.head;
    if span.contains(head) && head > end {
      Selection::point(end)
    } else {
      Selection::point(head)
    }
  } else {
    Selection::from_span(Span::new(span.from, end), selection.direction())
  };

  Ok((next, context))
}
