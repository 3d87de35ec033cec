//! The seam between the case commands and whatever editor runs them.
//!
//! Commands only see an [`EditorHost`]: a handful of primitives for reading
//! selections and text and for replacing ranges. Undo grouping is an optional
//! capability, [`GroupedEdits`], and the command picks how to use it through
//! a [`Grouping`] strategy chosen when it is built:
//!
//! - [`Ungrouped`] - every replacement is its own undo step
//! - [`Grouped`] - all replacements of an invocation undo together, and a
//!   failing invocation is rolled back
//!
//! [`Buffer`](crate::buffer::Buffer) is the in-memory implementation.

use std::borrow::Cow;

use crate::{
  position::Span,
  selection::{
    Selection,
    SelectionSet,
  },
};

/// The primitives a host editor provides.
pub trait EditorHost {
  type Error: std::error::Error;

  /// A fresh snapshot of the selections, in host order.
  fn selections(&self) -> SelectionSet;

  /// The live selection at `idx`, if there still is one.
  fn selection(&self, idx: usize) -> Option<Selection> {
    self.selections().get(idx)
  }

  /// The text of `line` without its line ending. Empty past the last line.
  fn line(&self, line: usize) -> Cow<'_, str>;

  /// The text covered by `span`.
  fn text_in(&self, span: Span) -> Cow<'_, str>;

  /// Replaces the text covered by `span` with `text`.
  fn replace_range(&mut self, span: Span, text: &str) -> Result<(), Self::Error>;

  fn set_selections(&mut self, selections: SelectionSet) -> Result<(), Self::Error>;
}

/// Hosts that can batch several replacements into one undo step.
pub trait GroupedEdits: EditorHost {
  fn begin_group(&mut self);

  /// Closes the group opened by the matching `begin_group`.
  fn end_group(&mut self) -> Result<(), Self::Error>;

  /// Reverts every edit made since the matching `begin_group` and closes it.
  fn abort_group(&mut self) -> Result<(), Self::Error>;
}

/// How the edits of one command invocation are committed.
pub trait Grouping<H: EditorHost> {
  fn run<T, F>(&self, host: &mut H, batch: F) -> Result<T, H::Error>
  where
    F: FnOnce(&mut H) -> Result<T, H::Error>;
}

/// Each replacement is committed on its own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ungrouped;

impl<H: EditorHost> Grouping<H> for Ungrouped {
  fn run<T, F>(&self, host: &mut H, batch: F) -> Result<T, H::Error>
  where
    F: FnOnce(&mut H) -> Result<T, H::Error>,
  {
    batch(host)
  }
}

/// The whole batch is one undo step, or nothing at all if it fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Grouped;

impl<H: GroupedEdits> Grouping<H> for Grouped {
  fn run<T, F>(&self, host: &mut H, batch: F) -> Result<T, H::Error>
  where
    F: FnOnce(&mut H) -> Result<T, H::Error>,
  {
    host.begin_group();
    match batch(host) {
      Ok(value) => {
        host.end_group()?;
        Ok(value)
      },
      Err(err) => {
        tracing::debug!(error = %err, "rolling back grouped edits");
        host.abort_group()?;
        Err(err)
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    buffer::{
      Buffer,
      BufferError,
    },
    position::Position,
    selection::SelectionError,
  };

  fn span(from: (usize, usize), to: (usize, usize)) -> Span {
    Span::new(from.into(), to.into())
  }

  /// Edits, then fails.
  fn failing_batch(host: &mut Buffer) -> Result<(), BufferError> {
    host.replace_range(span((0, 4), (0, 7)), "BAR")?;
    Err(SelectionError::EmptySelection.into())
  }

  #[test]
  fn failed_batch_is_rolled_back() {
    let caret = SelectionSet::point(Position::new(0, 5));
    let mut buffer = Buffer::new("foo bar").with_selections(caret.clone());

    let result = Grouped.run(&mut buffer, |host| {
      host.replace_range(span((0, 0), (0, 3)), "FOO")?;
      failing_batch(host)
    });

    assert!(matches!(
      result,
      Err(BufferError::Selection(SelectionError::EmptySelection))
    ));
    assert_eq!(buffer.text().to_string(), "foo bar");
    assert_eq!(buffer.selections(), caret);
    assert!(buffer.history().is_empty());
    assert!(!buffer.is_grouping());
  }

  #[test]
  fn failed_inner_batch_keeps_outer_edits() {
    let mut buffer = Buffer::new("foo bar");

    let result = Grouped.run(&mut buffer, |host| {
      host.replace_range(span((0, 0), (0, 3)), "FOO")?;
      assert!(Grouped.run(host, failing_batch).is_err());
      assert_eq!(host.text().to_string(), "FOO bar");
      assert!(host.is_grouping());
      Ok(())
    });

    assert!(result.is_ok());
    assert_eq!(buffer.text().to_string(), "FOO bar");
    assert_eq!(buffer.history().undo_depth(), 1);
  }

  #[test]
  fn ungrouped_failure_keeps_earlier_edits() {
    let mut buffer = Buffer::new("foo bar");

    let result = Ungrouped.run(&mut buffer, |host| {
      host.replace_range(span((0, 0), (0, 3)), "FOO")?;
      failing_batch(host)
    });

    assert!(result.is_err());
    assert_eq!(buffer.text().to_string(), "FOO BAR");
    assert_eq!(buffer.history().undo_depth(), 2);
  }
}
