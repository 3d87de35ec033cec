//! Edits to a rope, expressed as a walk over its characters.
//!
//! A [`ChangeSet`] is a list of [`Operation`]s consumed from the start of the
//! document: keep some characters, drop some, write new text. Its inverse is
//! computed against the text it was applied to, which is what history needs
//! to undo it later.
//!
//! ```ignore
//! let mut doc = Rope::from("make it LOUD");
//! let tx = Transaction::change(&doc, [(8, 12, Some("loud".into()))])?;
//! tx.apply(&mut doc)?;
//! assert_eq!(doc, "make it loud");
//! ```

use std::borrow::Cow;

use ropey::Rope;
use thiserror::Error;

use crate::{
  Tendril,
  selection::SelectionSet,
};

pub type Result<T> = std::result::Result<T, TransactionError>;

/// Replace the chars in `from..to` with the text, or delete them on `None`.
pub type Change = (usize, usize, Option<Tendril>);

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionError {
  #[error("change set expects a document of {expected} chars, got {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("change {from}..{to} ends before it starts")]
  InvalidRange { from: usize, to: usize },
  #[error("change {from}..{to} runs past the end of the document ({len} chars)")]
  RangeOutOfBounds {
    from: usize,
    to:   usize,
    len:  usize,
  },
  #[error("change {from}..{to} starts before the previous change ends at {prev_end}")]
  OverlappingRange {
    prev_end: usize,
    from:     usize,
    to:       usize,
  },
  #[error("position {pos} is past the end of the change set ({len} chars)")]
  PositionOutOfBounds { pos: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
  /// Keep this many chars.
  Retain(usize),
  /// Drop this many chars.
  Delete(usize),
  Insert(Tendril),
}

/// Which side of inserted text a mapped position ends up on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
  Before,
  After,
  /// `Before`, but inside a replacement of equal length the position keeps its
  /// offset from the start of the replacement.
  BeforeSticky,
  /// `After`, with the same equal-length rule as `BeforeSticky`.
  AfterSticky,
}

impl Assoc {
  const fn sticky(self) -> bool {
    matches!(self, Self::BeforeSticky | Self::AfterSticky)
  }

  const fn past_insert(self, inserted: usize) -> usize {
    match self {
      Self::After | Self::AfterSticky => inserted,
      Self::Before | Self::BeforeSticky => 0,
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
  ops:       Vec<Operation>,
  /// Length of the document this applies to.
  len:       usize,
  len_after: usize,
}

impl ChangeSet {
  /// A change set that keeps all `len` chars.
  pub fn identity(len: usize) -> Self {
    let mut changes = Self::default();
    changes.retain(len);
    changes
  }

  pub fn operations(&self) -> &[Operation] {
    &self.ops
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn len_after(&self) -> usize {
    self.len_after
  }

  /// True when applying leaves the text as it is.
  pub fn is_empty(&self) -> bool {
    self
      .ops
      .iter()
      .all(|op| matches!(op, Operation::Retain(_)))
  }

  pub fn retain(&mut self, n: usize) {
    if n > 0 {
      self.len += n;
      self.len_after += n;
      self.push(Operation::Retain(n));
    }
  }

  pub fn delete(&mut self, n: usize) {
    if n > 0 {
      self.len += n;
      self.push(Operation::Delete(n));
    }
  }

  pub fn insert(&mut self, text: Tendril) {
    if !text.is_empty() {
      self.len_after += text.chars().count();
      self.push(Operation::Insert(text));
    }
  }

  /// Appends `op`, folding it into the last operation when they are alike.
  fn push(&mut self, op: Operation) {
    if let Some(last) = self.ops.last_mut() {
      match (last, &op) {
        (Operation::Retain(a), Operation::Retain(b))
        | (Operation::Delete(a), Operation::Delete(b)) => {
          *a += b;
          return;
        },
        (Operation::Insert(a), Operation::Insert(b)) => {
          a.push_str(b);
          return;
        },
        _ => {},
      }
    }
    self.ops.push(op);
  }

  fn check_len(&self, actual: usize) -> Result<()> {
    if actual == self.len {
      Ok(())
    } else {
      Err(TransactionError::LengthMismatch {
        expected: self.len,
        actual,
      })
    }
  }

  pub fn apply(&self, text: &mut Rope) -> Result<()> {
    self.check_len(text.len_chars())?;

    let mut cursor = 0;
    for op in &self.ops {
      match op {
        Operation::Retain(n) => cursor += n,
        Operation::Delete(n) => text.remove(cursor..cursor + n),
        Operation::Insert(fragment) => {
          text.insert(cursor, fragment);
          cursor += fragment.chars().count();
        },
      }
    }
    Ok(())
  }

  /// The change set that turns the result of `self` back into `original`.
  pub fn invert(&self, original: &Rope) -> Result<Self> {
    self.check_len(original.len_chars())?;

    let mut inverse = Self::default();
    let mut cursor = 0;
    for op in &self.ops {
      match op {
        Operation::Retain(n) => {
          inverse.retain(*n);
          cursor += n;
        },
        Operation::Delete(n) => {
          let removed = Cow::from(original.slice(cursor..cursor + n));
          inverse.insert(Tendril::from(removed.as_ref()));
          cursor += n;
        },
        Operation::Insert(fragment) => inverse.delete(fragment.chars().count()),
      }
    }
    Ok(inverse)
  }

  /// Where the char offset `pos` of the original text ends up after the
  /// change.
  pub fn map_pos(&self, pos: usize, assoc: Assoc) -> Result<usize> {
    if pos > self.len {
      return Err(TransactionError::PositionOutOfBounds { pos, len: self.len });
    }

    // `old` walks the original text, `new` the changed one.
    let mut old = 0;
    let mut new = 0;
    let mut ops = self.ops.iter().peekable();

    while let Some(op) = ops.next() {
      match op {
        Operation::Retain(n) => {
          if pos < old + n {
            return Ok(new + pos - old);
          }
          old += n;
          new += n;
        },
        Operation::Delete(n) => {
          if pos < old + n {
            return Ok(new);
          }
          old += n;
        },
        Operation::Insert(fragment) => {
          let inserted = fragment.chars().count();
          // An insert followed by a delete replaces text.
          let replaced = match ops.peek() {
            Some(Operation::Delete(n)) => {
              let n = *n;
              ops.next();
              n
            },
            _ => 0,
          };

          if pos == old && !(assoc.sticky() && replaced > 0) {
            return Ok(new + assoc.past_insert(inserted));
          }
          if pos < old + replaced {
            if assoc.sticky() && replaced == inserted {
              return Ok(new + pos - old);
            }
            return Ok(new + assoc.past_insert(inserted));
          }
          old += replaced;
          new += inserted;
        },
      }
    }

    Ok(new)
  }
}

/// A change set, optionally carrying the selections to install once it is
/// applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transaction {
  changes:   ChangeSet,
  selection: Option<SelectionSet>,
}

impl From<ChangeSet> for Transaction {
  fn from(changes: ChangeSet) -> Self {
    Self {
      changes,
      selection: None,
    }
  }
}

impl Transaction {
  /// Builds a transaction from changes sorted by position that do not
  /// overlap.
  pub fn change<I>(doc: &Rope, changes: I) -> Result<Self>
  where
    I: IntoIterator<Item = Change>,
  {
    let len = doc.len_chars();
    let mut changeset = ChangeSet::default();
    let mut last = 0;

    for (from, to, text) in changes {
      if from > to {
        return Err(TransactionError::InvalidRange { from, to });
      }
      if to > len {
        return Err(TransactionError::RangeOutOfBounds { from, to, len });
      }
      if from < last {
        return Err(TransactionError::OverlappingRange {
          prev_end: last,
          from,
          to,
        });
      }

      changeset.retain(from - last);
      if let Some(text) = text {
        changeset.insert(text);
      }
      changeset.delete(to - from);
      last = to;
    }
    changeset.retain(len - last);

    Ok(changeset.into())
  }

  pub fn changes(&self) -> &ChangeSet {
    &self.changes
  }

  pub fn selection(&self) -> Option<&SelectionSet> {
    self.selection.as_ref()
  }

  #[must_use]
  pub fn with_selection(mut self, selection: SelectionSet) -> Self {
    self.selection = Some(selection);
    self
  }

  pub fn apply(&self, doc: &mut Rope) -> Result<()> {
    self.changes.apply(doc)
  }

  /// The transaction undoing this one. `original` is the text before it was
  /// applied.
  pub fn invert(&self, original: &Rope) -> Result<Self> {
    Ok(self.changes.invert(original)?.into())
  }
}
