//! Runs a per-selection action over every selection of a host.
//!
//! The coordinator snapshots the selection count once, then walks the indices
//! in host order. At every step it re-reads the live selection at that index,
//! because earlier edits may have moved or removed it; a vanished index is
//! skipped. Each callback returns the selection that should replace the one
//! it was given. That selection is written back into the live set right away,
//! so the host carries it through the edits of later callbacks, and the
//! collected list is installed at the end. Selections are identified by
//! index throughout.
//!
//! A state value is threaded through the callbacks in order: the first
//! processed selection gets the initial state, every later one gets what the
//! previous callback returned.

use std::fmt;

use smallvec::SmallVec;

use crate::{
  editor::{
    EditorHost,
    Grouping,
  },
  selection::{
    Selection,
    SelectionSet,
  },
};

/// Rewrites the collected selections before they are installed.
pub type SelectionHandler = Box<dyn Fn(Vec<Selection>) -> Vec<Selection> + Send + Sync>;

pub struct MultipleSelectionOptions {
  /// Run the action for every selection, even several on one line. When
  /// false only the first selection (in host order) whose head is on a given
  /// line is processed.
  pub repeat_same_line_actions: bool,
  pub selection_handler:        Option<SelectionHandler>,
}

impl Default for MultipleSelectionOptions {
  fn default() -> Self {
    Self {
      repeat_same_line_actions: true,
      selection_handler:        None,
    }
  }
}

impl fmt::Debug for MultipleSelectionOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MultipleSelectionOptions")
      .field("repeat_same_line_actions", &self.repeat_same_line_actions)
      .field("selection_handler", &self.selection_handler.is_some())
      .finish()
  }
}

impl MultipleSelectionOptions {
  #[must_use]
  pub fn once_per_line(mut self) -> Self {
    self.repeat_same_line_actions = false;
    self
  }

  #[must_use]
  pub fn with_selection_handler<F>(mut self, handler: F) -> Self
  where
    F: Fn(Vec<Selection>) -> Vec<Selection> + Send + Sync + 'static,
  {
    self.selection_handler = Some(Box::new(handler));
    self
  }
}

/// Indices of the first selection on each head line, in host order.
fn first_index_per_line(selections: &SelectionSet) -> SmallVec<[usize; 4]> {
  let mut seen_lines: SmallVec<[usize; 4]> = SmallVec::new();
  let mut indices = SmallVec::new();
  for (idx, selection) in selections.iter().enumerate() {
    if !seen_lines.contains(&selection.head.line) {
      seen_lines.push(selection.head.line);
      indices.push(idx);
    }
  }
  indices
}

/// Calls `callback` once per selection of `host` and installs the selections
/// it returns. Everything happens inside `grouping`.
///
/// If the final list is empty the host keeps its live selections, which
/// already hold any processed result. Returns the state handed back by the
/// last callback.
pub fn with_multiple_selections<H, G, S, F>(
  host: &mut H,
  grouping: &G,
  options: &MultipleSelectionOptions,
  state: S,
  mut callback: F,
) -> Result<S, H::Error>
where
  H: EditorHost,
  G: Grouping<H>,
  F: FnMut(&mut H, Selection, S) -> Result<(Selection, S), H::Error>,
{
  let snapshot = host.selections();
  let count = snapshot.len();
  let allowed = (!options.repeat_same_line_actions).then(|| first_index_per_line(&snapshot));

  tracing::debug!(
    selections = count,
    repeat_same_line = options.repeat_same_line_actions,
    "running action over selections"
  );

  grouping.run(host, move |host| {
    let mut state = state;
    let mut processed: Vec<(usize, Selection, bool)> = Vec::with_capacity(count);

    for idx in 0..count {
      if let Some(allowed) = &allowed
        && !allowed.contains(&idx)
      {
        continue;
      }
      let Some(selection) = host.selection(idx) else {
        tracing::trace!(index = idx, "selection vanished, skipping");
        continue;
      };

      let (next, next_state) = callback(host, selection, state)?;
      tracing::trace!(index = idx, ?selection, ?next, "processed selection");
      let installed = match host.selections().replace(idx, next) {
        Ok(live) => {
          host.set_selections(live)?;
          true
        },
        Err(_) => false,
      };
      processed.push((idx, next, installed));
      state = next_state;
    }

    // Read back what later edits made of each installed result.
    let mut collected: Vec<Selection> = processed
      .into_iter()
      .map(|(idx, next, installed)| {
        if installed {
          host.selection(idx).unwrap_or(next)
        } else {
          next
        }
      })
      .collect();

    if let Some(handler) = &options.selection_handler {
      collected = handler(collected);
    }

    match SelectionSet::new(collected) {
      Ok(selections) => host.set_selections(selections)?,
      Err(_) => tracing::debug!("no selections collected, keeping the current ones"),
    }
    Ok(state)
  })
}
