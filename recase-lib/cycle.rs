//! The case cycle.
//!
//! Each invocation of the cycle looks at a *reference* text, decides which
//! case it is currently in and moves it one step forward:
//!
//! ```text
//! Extended: UPPER -> lower -> Title -> Sentence -> UPPER
//! Basic:    UPPER -> lower -> Title -> UPPER
//! ```
//!
//! Classification compares the reference against its own renderings in the
//! fixed order upper, lower, title, sentence; the first exact match wins. Text
//! matching none of them (mixed casing) goes to UPPER.
//!
//! # Synchronized cycling
//!
//! With several selections, the first one can set the pace for the others: a
//! [`CycleContext`] created with `sync = true` captures the text of the first
//! selection it sees and classifies every later selection against that text,
//! while still transforming each selection's own text. The context is a plain
//! value created per invocation and handed back by [`CaseCycle::advance`], so
//! nothing leaks from one invocation into the next.
//!
//! ```ignore
//! let cycle = CaseCycle::new(CycleMode::Extended);
//! let step = cycle.advance(CycleContext::new(true), "FOO");
//! assert_eq!(step.replacement.as_str(), "foo");
//!
//! // "bar baz" is lowercase, but the captured "FOO" decides.
//! let step = cycle.advance(step.context, "BAR baz");
//! assert_eq!(step.replacement.as_str(), "bar baz");
//! ```

use crate::{
  Tendril,
  case_convention::{
    to_lower_case_with,
    to_sentence_case_with,
    to_title_case_with,
    to_upper_case_with,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseKind {
  Upper,
  Lower,
  Title,
  Sentence,
}

impl CaseKind {
  pub fn apply(self, text: &str) -> Tendril {
    let mut res = Tendril::new();
    self.apply_with(text, &mut res);
    res
  }

  pub fn apply_with(self, text: &str, buf: &mut Tendril) {
    match self {
      Self::Upper => to_upper_case_with(text.chars(), buf),
      Self::Lower => to_lower_case_with(text.chars(), buf),
      Self::Title => to_title_case_with(text.chars(), buf),
      Self::Sentence => to_sentence_case_with(text.chars(), buf),
    }
  }

  /// Whether `text` renders to itself under this case.
  pub fn matches(self, text: &str) -> bool {
    self.apply(text).as_str() == text
  }
}

/// Which states the cycle walks through.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CycleMode {
  /// Upper, lower, title.
  Basic,
  /// Upper, lower, title, sentence.
  #[default]
  Extended,
}

impl CycleMode {
  /// The states in classification priority order.
  pub const fn kinds(self) -> &'static [CaseKind] {
    match self {
      Self::Basic => &[CaseKind::Upper, CaseKind::Lower, CaseKind::Title],
      Self::Extended => &[
        CaseKind::Upper,
        CaseKind::Lower,
        CaseKind::Title,
        CaseKind::Sentence,
      ],
    }
  }
}

/// The per-invocation synchronization state.
///
/// INVARIANT: once a reference is captured it is never replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleContext {
  sync:      bool,
  reference: Option<Tendril>,
}

impl CycleContext {
  pub const fn new(sync: bool) -> Self {
    Self {
      sync,
      reference: None,
    }
  }

  #[inline]
  pub const fn is_synced(&self) -> bool {
    self.sync
  }

  /// The captured reference text, if any.
  #[inline]
  pub fn reference(&self) -> Option<&str> {
    self.reference.as_deref()
  }

  /// The text used to classify a selection whose own text is `selected`.
  #[inline]
  pub fn reference_for<'a>(&'a self, selected: &'a str) -> &'a str {
    self.reference().unwrap_or(selected)
  }

  /// Captures `selected` as the reference when syncing and nothing has been
  /// captured yet.
  #[must_use]
  pub fn capture(mut self, selected: &str) -> Self {
    if self.sync && self.reference.is_none() {
      self.reference = Some(selected.into());
    }
    self
  }
}

/// Outcome of cycling one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStep {
  /// The case the selection moves to.
  pub target:      CaseKind,
  /// The selection's text rendered in `target`.
  pub replacement: Tendril,
  /// Context to hand to the next selection of the same invocation.
  pub context:     CycleContext,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CaseCycle {
  mode: CycleMode,
}

impl CaseCycle {
  pub const fn new(mode: CycleMode) -> Self {
    Self { mode }
  }

  #[inline]
  pub const fn mode(&self) -> CycleMode {
    self.mode
  }

  /// The case `text` is currently in, or `None` for irregular casing.
  pub fn classify(&self, text: &str) -> Option<CaseKind> {
    self
      .mode
      .kinds()
      .iter()
      .copied()
      .find(|kind| kind.matches(text))
  }

  /// The state that follows `current`.
  pub fn next_after(&self, current: Option<CaseKind>) -> CaseKind {
    match (current, self.mode) {
      (Some(CaseKind::Upper), _) => CaseKind::Lower,
      (Some(CaseKind::Lower), _) => CaseKind::Title,
      (Some(CaseKind::Title), CycleMode::Extended) => CaseKind::Sentence,
      (Some(CaseKind::Title), CycleMode::Basic) => CaseKind::Upper,
      (Some(CaseKind::Sentence), _) | (None, _) => CaseKind::Upper,
    }
  }

  /// The case a text classified as `reference` moves to.
  pub fn target_for(&self, reference: &str) -> CaseKind {
    self.next_after(self.classify(reference))
  }

  /// Cycles `selected` one step.
  ///
  /// `context` decides the reference text; the returned context must be
  /// passed to the next selection of the same invocation.
  pub fn advance(&self, context: CycleContext, selected: &str) -> CycleStep {
    let context = context.capture(selected);
    let target = self.target_for(context.reference_for(selected));
    CycleStep {
      target,
      replacement: target.apply(selected),
      context,
    }
  }
}
