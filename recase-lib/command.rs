//! The toggle-case command.
//!
//! One invocation walks every selection of the host once. Each selection (or
//! the word under a caret) moves one step through the case cycle, or to a
//! fixed case with [`ToggleCase::with_action`]. With
//! `sync_case_across_multiple_cursors` on, the first selection decides the
//! step for all of them.

use crate::{
  case_action::{
    CaseAction,
    transform_case,
  },
  cycle::{
    CaseCycle,
    CycleContext,
    CycleMode,
  },
  editor::{
    EditorHost,
    Grouping,
    Ungrouped,
  },
  multi_selection::{
    MultipleSelectionOptions,
    with_multiple_selections,
  },
  settings::Settings,
};

#[derive(Debug)]
pub struct ToggleCase<G = Ungrouped> {
  settings: Settings,
  cycle:    CaseCycle,
  action:   CaseAction,
  options:  MultipleSelectionOptions,
  grouping: G,
}

impl ToggleCase {
  pub const ID: &'static str = "toggle-case";
  pub const NAME: &'static str = "Toggle Case";

  pub fn new(settings: Settings) -> Self {
    Self {
      settings,
      cycle: CaseCycle::default(),
      action: CaseAction::Next,
      options: MultipleSelectionOptions::default(),
      grouping: Ungrouped,
    }
  }
}

impl Default for ToggleCase {
  fn default() -> Self {
    Self::new(Settings::default())
  }
}

impl<G> ToggleCase<G> {
  /// Commits edits through `grouping` instead.
  pub fn with_grouping<G2>(self, grouping: G2) -> ToggleCase<G2> {
    ToggleCase {
      settings: self.settings,
      cycle: self.cycle,
      action: self.action,
      options: self.options,
      grouping,
    }
  }

  #[must_use]
  pub fn with_mode(mut self, mode: CycleMode) -> Self {
    self.cycle = CaseCycle::new(mode);
    self
  }

  #[must_use]
  pub fn with_action(mut self, action: CaseAction) -> Self {
    self.action = action;
    self
  }

  #[must_use]
  pub fn with_options(mut self, options: MultipleSelectionOptions) -> Self {
    self.options = options;
    self
  }

  pub fn settings(&self) -> &Settings {
    &self.settings
  }

  pub fn set_settings(&mut self, settings: Settings) {
    self.settings = settings;
  }

  pub fn action(&self) -> CaseAction {
    self.action
  }

  pub fn mode(&self) -> CycleMode {
    self.cycle.mode()
  }

  /// Runs one invocation against `host`.
  pub fn run<H>(&self, host: &mut H) -> Result<(), H::Error>
  where
    H: EditorHost,
    G: Grouping<H>,
  {
    let sync = self.settings.sync_case_across_multiple_cursors;
    tracing::debug!(action = %self.action, mode = ?self.cycle.mode(), sync, "toggle case");

    let context = with_multiple_selections(
      host,
      &self.grouping,
      &self.options,
      CycleContext::new(sync),
      |host, selection, context| transform_case(host, selection, self.action, &self.cycle, context),
    )?;

    if let Some(reference) = context.reference() {
      tracing::trace!(reference, "synced to primary selection");
    }
    Ok(())
  }
}
