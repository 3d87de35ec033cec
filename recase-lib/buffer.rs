//! An in-memory [`EditorHost`] backed by a rope.
//!
//! Replacements map every selection through the change, the way an editor
//! keeps its carets in place while text around them moves. Selections that
//! land on each other are merged, keeping the earlier one, so a later index
//! can disappear in the middle of a command.
//!
//! Outside of a group each replacement is its own history revision. Inside a
//! group ([`GroupedEdits::begin_group`] .. [`GroupedEdits::end_group`]) all
//! replacements become one revision.

use std::{
  borrow::Cow,
  cmp::Ordering,
};

use recase_core::line_ending::line_end_char_index;
use ropey::Rope;
use thiserror::Error;

use crate::{
  editor::{
    EditorHost,
    GroupedEdits,
  },
  history::{
    EditGroup,
    History,
    HistoryError,
    HistoryJump,
  },
  position::{
    Position,
    Span,
    char_idx_at_coords,
    coords_at_pos,
  },
  selection::{
    Selection,
    SelectionError,
    SelectionSet,
  },
  transaction::{
    Assoc,
    ChangeSet,
    Transaction,
    TransactionError,
  },
};

#[derive(Debug, Error)]
pub enum BufferError {
  #[error(transparent)]
  Transaction(#[from] TransactionError),
  #[error(transparent)]
  Selection(#[from] SelectionError),
  #[error(transparent)]
  History(#[from] HistoryError),
}

pub type Result<T> = std::result::Result<T, BufferError>;

/// One `begin_group` that has not been closed yet.
#[derive(Debug)]
struct GroupLevel {
  /// Edits the pending group held when this level was opened.
  mark:              usize,
  selections_before: SelectionSet,
}

#[derive(Debug, Default)]
struct PendingGroup {
  levels: Vec<GroupLevel>,
  edits:  EditGroup,
}

#[derive(Debug)]
pub struct Buffer {
  text:       Rope,
  selections: SelectionSet,
  history:    History,
  pending:    Option<PendingGroup>,
  version:    u64,
}

impl Buffer {
  /// A buffer holding `text` with a single caret at the start.
  pub fn new(text: impl Into<Rope>) -> Self {
    Self {
      text:       text.into(),
      selections: SelectionSet::point(Position::zero()),
      history:    History::default(),
      pending:    None,
      version:    0,
    }
  }

  #[must_use]
  pub fn with_selections(mut self, selections: SelectionSet) -> Self {
    self.selections = selections;
    self
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  /// Bumped on every change to the text.
  pub fn version(&self) -> u64 {
    self.version
  }

  pub fn history(&self) -> &History {
    &self.history
  }

  pub fn is_grouping(&self) -> bool {
    self.pending.is_some()
  }

  pub fn apply_transaction(&mut self, transaction: &Transaction) -> Result<()> {
    let original = self.text.clone();
    let selections_before = self.selections.clone();

    transaction.apply(&mut self.text)?;
    self.selections = match transaction.selection() {
      Some(selections) => selections.clone(),
      None => self.map_selections(&original, transaction.changes())?,
    };

    match &mut self.pending {
      Some(group) => group.edits.push(transaction.clone(), &original)?,
      None => {
        let mut edits = EditGroup::default();
        edits.push(transaction.clone(), &original)?;
        self
          .history
          .commit_revision(edits, selections_before, self.selections.clone());
      },
    }

    self.version = self.version.saturating_add(1);
    tracing::trace!(version = self.version, "applied transaction");
    Ok(())
  }

  /// Carries the selections across `changes`, which turned `original` into
  /// the current text.
  fn map_selections(&self, original: &Rope, changes: &ChangeSet) -> Result<SelectionSet> {
    let old = original.slice(..);
    let new = self.text.slice(..);
    let map = |pos: Position, assoc: Assoc| -> Result<Position> {
      let idx = changes.map_pos(char_idx_at_coords(old, pos), assoc)?;
      Ok(coords_at_pos(new, idx))
    };

    let mut mapped = Vec::with_capacity(self.selections.len());
    for selection in &self.selections {
      // Carets and the inner ends of selections keep their offset inside an
      // equal-size replacement, like a case change.
      let (anchor_assoc, head_assoc) = match selection.anchor.cmp(&selection.head) {
        Ordering::Equal => (Assoc::AfterSticky, Assoc::AfterSticky),
        Ordering::Less => (Assoc::AfterSticky, Assoc::BeforeSticky),
        Ordering::Greater => (Assoc::BeforeSticky, Assoc::AfterSticky),
      };
      mapped.push(Selection::new(
        map(selection.anchor, anchor_assoc)?,
        map(selection.head, head_assoc)?,
      ));
    }

    Ok(SelectionSet::new(mapped)?.dedup())
  }

  pub fn undo(&mut self) -> Result<bool> {
    let Some(jump) = self.history.undo() else {
      return Ok(false);
    };
    self.apply_history_jump(&jump)?;
    self.history.apply_jump(&jump)?;
    Ok(true)
  }

  pub fn redo(&mut self) -> Result<bool> {
    let Some(jump) = self.history.redo() else {
      return Ok(false);
    };
    self.apply_history_jump(&jump)?;
    self.history.apply_jump(&jump)?;
    Ok(true)
  }

  fn apply_history_jump(&mut self, jump: &HistoryJump) -> Result<()> {
    for txn in &jump.transactions {
      let original = self.text.clone();
      txn.apply(&mut self.text)?;
      self.selections = match txn.selection() {
        Some(selections) => selections.clone(),
        None => self.map_selections(&original, txn.changes())?,
      };
    }

    self.pending = None;
    self.version = self.version.saturating_add(1);
    Ok(())
  }
}

impl EditorHost for Buffer {
  type Error = BufferError;

  fn selections(&self) -> SelectionSet {
    self.selections.clone()
  }

  fn selection(&self, idx: usize) -> Option<Selection> {
    self.selections.get(idx)
  }

  fn line(&self, line: usize) -> Cow<'_, str> {
    if line >= self.text.len_lines() {
      return Cow::Borrowed("");
    }
    let start = self.text.line_to_char(line);
    let end = line_end_char_index(self.text.slice(..), line);
    self.text.slice(start..end).into()
  }

  fn text_in(&self, span: Span) -> Cow<'_, str> {
    let text = self.text.slice(..);
    let from = char_idx_at_coords(text, span.from);
    let to = char_idx_at_coords(text, span.to);
    self.text.slice(from..to).into()
  }

  fn replace_range(&mut self, span: Span, text: &str) -> Result<()> {
    let slice = self.text.slice(..);
    let from = char_idx_at_coords(slice, span.from);
    let to = char_idx_at_coords(slice, span.to);
    let tx = Transaction::change(&self.text, [(from, to, Some(text.into()))])?;
    self.apply_transaction(&tx)
  }

  fn set_selections(&mut self, selections: SelectionSet) -> Result<()> {
    self.selections = selections;
    Ok(())
  }
}

impl GroupedEdits for Buffer {
  fn begin_group(&mut self) {
    let selections_before = self.selections.clone();
    let group = self.pending.get_or_insert_with(PendingGroup::default);
    group.levels.push(GroupLevel {
      mark: group.edits.len(),
      selections_before,
    });
  }

  fn end_group(&mut self) -> Result<()> {
    let Some(group) = &mut self.pending else {
      return Ok(());
    };
    let Some(level) = group.levels.pop() else {
      return Ok(());
    };
    if !group.levels.is_empty() {
      return Ok(());
    }

    if let Some(group) = self.pending.take() {
      tracing::debug!(edits = group.edits.len(), "committing edit group");
      self
        .history
        .commit_revision(group.edits, level.selections_before, self.selections.clone());
    }
    Ok(())
  }

  /// Reverts the edits of the innermost open group only. Outer groups stay
  /// open with their earlier edits.
  fn abort_group(&mut self) -> Result<()> {
    let Some(group) = &mut self.pending else {
      return Ok(());
    };
    let Some(level) = group.levels.pop() else {
      return Ok(());
    };
    let reverted = group.edits.split_off(level.mark);
    if group.levels.is_empty() {
      self.pending = None;
    }

    for inversion in reverted.inversions().iter().rev() {
      inversion.apply(&mut self.text)?;
    }
    self.selections = level.selections_before;
    self.version = self.version.saturating_add(1);
    tracing::debug!(edits = reverted.len(), "reverted edit group");
    Ok(())
  }
}
