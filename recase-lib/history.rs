use std::num::NonZeroUsize;

use ropey::Rope;
use thiserror::Error;

use crate::{
  selection::SelectionSet,
  transaction::{
    Transaction,
    TransactionError,
  },
};

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Error)]
pub enum HistoryError {
  #[error("history transaction failed: {0}")]
  Transaction(#[from] TransactionError),
  #[error("no revision {index}, the last one is {max}")]
  RevisionOutOfBounds { index: usize, max: usize },
}

/// Edits applied one after the other that undo and redo as a unit.
///
/// Every transaction is stored next to its inversion, computed against the
/// document right before the transaction ran.
#[derive(Debug, Clone, Default)]
pub struct EditGroup {
  transactions: Vec<Transaction>,
  inversions:   Vec<Transaction>,
}

impl EditGroup {
  /// Records `transaction`. `original` is the document it was applied to.
  pub fn push(&mut self, transaction: Transaction, original: &Rope) -> Result<()> {
    let inversion = transaction.invert(original)?;
    self.transactions.push(transaction);
    self.inversions.push(inversion);
    Ok(())
  }

  /// Takes out every edit pushed after the first `at`.
  pub fn split_off(&mut self, at: usize) -> EditGroup {
    EditGroup {
      transactions: self.transactions.split_off(at),
      inversions:   self.inversions.split_off(at),
    }
  }

  /// The inversions, in the order their transactions were pushed.
  pub fn inversions(&self) -> &[Transaction] {
    &self.inversions
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.transactions.is_empty()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.transactions.len()
  }
}

/// An undo or redo step, computed but not taken yet.
///
/// Apply `transactions` to the text in order, then confirm with
/// [`History::apply_jump`]. The last transaction carries the selections to
/// restore.
#[derive(Debug, Clone)]
pub struct HistoryJump {
  pub transactions: Vec<Transaction>,
  /// Revision the history moves to once confirmed.
  pub target:       usize,
}

impl HistoryJump {
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.transactions.is_empty()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.transactions.len()
  }
}

/// Undo history of a buffer.
///
/// The history is a vector of revisions that always starts with an empty
/// root. Each other revision has a parent, the group of transactions that
/// leads from the parent to itself, and their inversions. Undo applies the
/// inversions last-to-first and moves to the parent; redo replays the last
/// child's transactions.
///
/// Committing a new revision updates the last child of the current revision
/// and pushes the new one to the end of the vector, so older branches stay
/// reachable by index but are not redone.
#[derive(Debug)]
pub struct History {
  revisions: Vec<Revision>,
  current:   usize,
}

/// One undo step. The root has no transactions and is its own parent.
#[derive(Debug, Clone)]
struct Revision {
  parent:       usize,
  last_child:   Option<NonZeroUsize>,
  transactions: Vec<Transaction>,
  inversions:   Vec<Transaction>,
}

impl Default for History {
  fn default() -> Self {
    Self {
      revisions: vec![Revision {
        parent:       0,
        last_child:   None,
        transactions: Vec::new(),
        inversions:   Vec::new(),
      }],
      current:   0,
    }
  }
}

impl History {
  /// Commits `group` as a single revision. Empty groups are ignored.
  ///
  /// `before` and `after` are the selections to restore on undo and redo.
  pub fn commit_revision(&mut self, group: EditGroup, before: SelectionSet, after: SelectionSet) {
    let EditGroup {
      mut transactions,
      mut inversions,
    } = group;

    let (Some(last_tx), Some(first_inv)) = (transactions.pop(), inversions.first_mut()) else {
      return;
    };
    transactions.push(last_tx.with_selection(after));
    // Inversions replay back to front, so the first one runs last.
    *first_inv = std::mem::take(first_inv).with_selection(before);

    let new_current = self.revisions.len();
    self.revisions[self.current].last_child = NonZeroUsize::new(new_current);
    self.revisions.push(Revision {
      parent: self.current,
      last_child: None,
      transactions,
      inversions,
    });
    self.current = new_current;
  }

  #[inline]
  pub fn current_revision(&self) -> usize {
    self.current
  }

  #[inline]
  pub const fn at_root(&self) -> bool {
    self.current == 0
  }

  /// Returns the number of revisions in the history, root included.
  #[inline]
  pub fn len(&self) -> usize {
    self.revisions.len()
  }

  /// Nothing was committed yet.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.revisions.len() <= 1
  }

  /// Number of undo steps available from the current revision.
  pub fn undo_depth(&self) -> usize {
    let mut depth = 0;
    let mut revision = self.current;
    while revision != 0 {
      revision = self.revisions[revision].parent;
      depth += 1;
    }
    depth
  }

  fn validate_revision(&self, revision: usize) -> Result<()> {
    if revision >= self.revisions.len() {
      return Err(HistoryError::RevisionOutOfBounds {
        index: revision,
        max:   self.revisions.len().saturating_sub(1),
      });
    }
    Ok(())
  }

  /// The step back to the parent revision, `None` at the root.
  pub fn undo(&self) -> Option<HistoryJump> {
    if self.at_root() {
      return None;
    }

    let current_revision = &self.revisions[self.current];
    Some(HistoryJump {
      transactions: current_revision.inversions.iter().rev().cloned().collect(),
      target:       current_revision.parent,
    })
  }

  /// The step forward to the most recent child, if there is one.
  pub fn redo(&self) -> Option<HistoryJump> {
    let last_child = self.revisions[self.current].last_child?;

    Some(HistoryJump {
      transactions: self.revisions[last_child.get()].transactions.clone(),
      target:       last_child.get(),
    })
  }

  /// Moves to `jump.target`. Call once every transaction of the jump has
  /// been applied to the text.
  pub fn apply_jump(&mut self, jump: &HistoryJump) -> Result<()> {
    self.validate_revision(jump.target)?;
    self.current = jump.target;
    Ok(())
  }
}
