//! Carets and selections as the host editor reports them.
//!
//! `head` is the end the caret sits on and `anchor` the end the selection was
//! started from. Equal ends make a caret.
//!
//! ```text
//! anchor=(0,2), head=(0,7): "he[llo w]orld"  (forward selection)
//! anchor=(0,7), head=(0,2): "he]llo w[orld"  (backward selection)
//! anchor=(0,5), head=(0,5): "hello|world"    (caret)
//! ```
//!
//! [`Selection::span`] returns the ends in document order regardless of
//! direction.
//!
//! # Selection Sets
//!
//! A [`SelectionSet`] holds one or more selections in the order the host
//! reports them. Unlike a sorted multi-cursor model, the order is meaningful:
//! index 0 is the primary selection, and it drives case synchronization.
//! The set is never sorted or merged implicitly.
//!
//! Removing the last selection or indexing past the end fails with
//! [`SelectionError`].

use smallvec::{
  SmallVec,
  smallvec,
};
use thiserror::Error;

use crate::{
  movement::Direction,
  position::{
    Position,
    Span,
  },
};

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
  #[error("selection set must contain at least one selection")]
  EmptySelection,
  #[error("selection index {index} out of bounds for selection set of length {len}")]
  IndexOutOfBounds { index: usize, len: usize },
  #[error("cannot remove the last selection from a selection set")]
  RemoveLastSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
  pub anchor: Position,
  pub head:   Position,
}

impl Selection {
  pub const fn new(anchor: Position, head: Position) -> Self {
    Self { anchor, head }
  }

  #[inline]
  pub const fn point(head: Position) -> Self {
    Self::new(head, head)
  }

  /// A caret: no text selected.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  /// The selected range in document order.
  ///
  /// Handles both selections made upwards and selections made backwards on a
  /// single line.
  #[inline]
  pub fn span(&self) -> Span {
    Span::new(self.anchor, self.head)
  }

  #[inline]
  #[must_use]
  pub fn direction(&self) -> Direction {
    if self.head < self.anchor {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }

  /// Swaps anchor and head.
  #[inline]
  #[must_use]
  pub fn flip(&self) -> Self {
    Self {
      anchor: self.head,
      head:   self.anchor,
    }
  }

  #[inline]
  #[must_use]
  pub fn with_direction(self, direction: Direction) -> Self {
    if self.direction() == direction {
      self
    } else {
      self.flip()
    }
  }

  /// A selection covering `span`, heading the way `direction` says.
  pub fn from_span(span: Span, direction: Direction) -> Self {
    Self::new(span.from, span.to).with_direction(direction)
  }
}

impl From<Span> for Selection {
  fn from(span: Span) -> Self {
    Self::new(span.from, span.to)
  }
}

impl From<(Position, Position)> for Selection {
  fn from(value: (Position, Position)) -> Self {
    Self::new(value.0, value.1)
  }
}

/// One or more selections, in host order.
/// INVARIANT: A selection set can never be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
  selections: SmallVec<[Selection; 1]>,
}

impl SelectionSet {
  pub fn new(selections: impl IntoIterator<Item = Selection>) -> Result<Self> {
    let selections: SmallVec<[Selection; 1]> = selections.into_iter().collect();
    if selections.is_empty() {
      return Err(SelectionError::EmptySelection);
    }
    Ok(Self { selections })
  }

  /// A single caret.
  pub fn point(pos: Position) -> Self {
    Self::single(Selection::point(pos))
  }

  pub fn single(selection: Selection) -> Self {
    Self {
      selections: smallvec![selection],
    }
  }

  #[inline]
  pub fn selections(&self) -> &[Selection] {
    &self.selections
  }

  /// The selection that drives synchronization.
  #[inline]
  pub fn primary(&self) -> Selection {
    self.selections[0]
  }

  #[inline]
  pub fn get(&self, idx: usize) -> Option<Selection> {
    self.selections.get(idx).copied()
  }

  pub fn selection_at(&self, idx: usize) -> Result<Selection> {
    self.get(idx).ok_or(SelectionError::IndexOutOfBounds {
      index: idx,
      len:   self.selections.len(),
    })
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.selections.len()
  }

  /// Always false; kept for API symmetry with `len`.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.selections.is_empty()
  }

  #[must_use]
  pub fn push(mut self, selection: Selection) -> Self {
    self.selections.push(selection);
    self
  }

  pub fn remove(mut self, idx: usize) -> Result<Self> {
    if self.selections.len() == 1 {
      return Err(SelectionError::RemoveLastSelection);
    }
    if idx >= self.selections.len() {
      return Err(SelectionError::IndexOutOfBounds {
        index: idx,
        len:   self.selections.len(),
      });
    }
    self.selections.remove(idx);
    Ok(self)
  }

  pub fn replace(mut self, idx: usize, selection: Selection) -> Result<Self> {
    let len = self.selections.len();
    let slot = self
      .selections
      .get_mut(idx)
      .ok_or(SelectionError::IndexOutOfBounds { index: idx, len })?;
    *slot = selection;
    Ok(self)
  }

  /// Applies `f` to every selection, keeping the order.
  #[must_use]
  pub fn transform<F>(mut self, mut f: F) -> Self
  where
    F: FnMut(Selection) -> Selection,
  {
    for selection in self.selections.iter_mut() {
      *selection = f(*selection);
    }
    self
  }

  /// Drops later duplicates of an identical selection, keeping the first.
  #[must_use]
  pub fn dedup(mut self) -> Self {
    let mut seen: SmallVec<[Selection; 4]> = SmallVec::new();
    self.selections.retain(|selection| {
      if seen.contains(selection) {
        false
      } else {
        seen.push(*selection);
        true
      }
    });
    self
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
    self.selections.iter()
  }
}

impl<'a> IntoIterator for &'a SelectionSet {
  type Item = &'a Selection;
  type IntoIter = std::slice::Iter<'a, Selection>;

  fn into_iter(self) -> std::slice::Iter<'a, Selection> {
    self.selections.iter()
  }
}

impl IntoIterator for SelectionSet {
  type Item = Selection;
  type IntoIter = smallvec::IntoIter<[Selection; 1]>;

  fn into_iter(self) -> smallvec::IntoIter<[Selection; 1]> {
    self.selections.into_iter()
  }
}

impl From<Selection> for SelectionSet {
  fn from(selection: Selection) -> Self {
    Self::single(selection)
  }
}
