use std::path::PathBuf;

use anyhow::Result;
use clap::{
  ArgAction,
  Parser,
};
use recase_lib::{
  case_action::CaseAction,
  cycle::CycleMode,
  multi_selection::MultipleSelectionOptions,
  position::Position,
  selection::{
    Selection,
    SelectionSet,
  },
};

#[derive(Parser, Debug)]
#[command(name = "recase", about, long_about = None, version)]
pub struct Args {
  /// File whose text is recased
  #[arg(value_name = "FILE")]
  pub file: PathBuf,

  /// Caret (LINE:COL) or selection (LINE:COL-LINE:COL, anchor first), 1-based.
  /// Repeat for more selections; the first one is the primary.
  #[arg(
    long = "cursor",
    visible_alias = "select",
    value_name = "L:C[-L:C]",
    value_parser = parse_selection
  )]
  pub selections: Vec<Selection>,

  /// How many times to run the command
  #[arg(short = 'n', long = "times", value_name = "N", default_value_t = 1)]
  pub times: usize,

  /// Cycle every selection on its own, overriding the settings file
  #[arg(long = "no-sync")]
  pub no_sync: bool,

  /// Cycle through upper, lower and title case only
  #[arg(long = "basic")]
  pub basic: bool,

  /// next, upper, lower, title or sentence
  #[arg(long = "action", value_name = "ACTION", default_value = "next")]
  pub action: CaseAction,

  /// Only act on the first selection of each line
  #[arg(long = "same-line-once")]
  pub same_line_once: bool,

  /// Write the result back to FILE instead of printing it
  #[arg(short = 'w', long = "write")]
  pub write: bool,

  /// Load settings from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  pub config_file: Option<PathBuf>,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  pub verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE")]
  pub log_file: Option<PathBuf>,
}

impl Args {
  /// The requested selections, or a caret at the start of the file.
  pub fn selection_set(&self) -> SelectionSet {
    SelectionSet::new(self.selections.iter().copied())
      .unwrap_or_else(|_| SelectionSet::point(Position::zero()))
  }

  pub fn mode(&self) -> CycleMode {
    if self.basic {
      CycleMode::Basic
    } else {
      CycleMode::Extended
    }
  }

  pub fn options(&self) -> MultipleSelectionOptions {
    let options = MultipleSelectionOptions::default();
    if self.same_line_once {
      options.once_per_line()
    } else {
      options
    }
  }
}

/// Formats a position the way it is parsed, 1-based.
pub fn display_position(pos: Position) -> String {
  format!("{}:{}", pos.line + 1, pos.column + 1)
}

fn parse_position(value: &str) -> Result<Position, String> {
  let (line, column) = value
    .split_once(':')
    .ok_or_else(|| format!("expected LINE:COL, got '{value}'"))?;
  let line: usize = line
    .trim()
    .parse()
    .map_err(|_| format!("invalid line in '{value}'"))?;
  let column: usize = column
    .trim()
    .parse()
    .map_err(|_| format!("invalid column in '{value}'"))?;
  if line == 0 || column == 0 {
    return Err(format!("positions are 1-based, got '{value}'"));
  }
  Ok(Position::new(line - 1, column - 1))
}

fn parse_selection(value: &str) -> Result<Selection, String> {
  match value.split_once('-') {
    Some((anchor, head)) => Ok(Selection::new(parse_position(anchor)?, parse_position(head)?)),
    None => parse_position(value).map(Selection::point),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_carets_and_selections() {
    assert_eq!(
      parse_selection("1:1"),
      Ok(Selection::point(Position::new(0, 0)))
    );
    assert_eq!(
      parse_selection("3:7-2:1"),
      Ok(Selection::new(Position::new(2, 6), Position::new(1, 0)))
    );
    assert!(parse_selection("0:1").is_err());
    assert!(parse_selection("4").is_err());
    assert!(parse_selection("1:x").is_err());
  }

  #[test]
  fn selections_keep_argument_order() {
    let args = Args::try_parse_from([
      "recase",
      "file.txt",
      "--cursor",
      "2:1",
      "--select",
      "1:1-1:4",
      "--no-sync",
    ])
    .unwrap();

    let set = args.selection_set();
    assert_eq!(set.primary(), Selection::point(Position::new(1, 0)));
    assert_eq!(set.len(), 2);
    assert!(args.no_sync);
    assert_eq!(args.action, CaseAction::Next);
  }

  #[test]
  fn defaults_to_caret_at_start() {
    let args = Args::try_parse_from(["recase", "file.txt", "--action", "upper"]).unwrap();
    assert_eq!(args.selection_set(), SelectionSet::point(Position::zero()));
    assert_eq!(args.action, CaseAction::Upper);
    assert_eq!(args.mode(), CycleMode::Extended);
    assert_eq!(args.times, 1);
  }

  #[test]
  fn display_is_one_based() {
    assert_eq!(display_position(Position::new(0, 4)), "1:5");
  }
}
