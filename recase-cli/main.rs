use std::{
  fs::File,
  io::{
    self,
    BufReader,
    BufWriter,
    Write,
  },
  path::Path,
};

use anyhow::{
  Context,
  Result,
};
use clap::Parser;
use log::LevelFilter;
use recase_lib::{
  buffer::Buffer,
  command::ToggleCase,
  editor::{
    EditorHost,
    Grouped,
  },
  settings::{
    SettingsStore,
    TomlSettingsStore,
  },
};
use ropey::Rope;

use crate::cli::{
  Args,
  display_position,
};

mod cli;

fn main() -> Result<()> {
  let args = Args::parse();
  setup_logging(args.verbosity, args.log_file.as_deref())?;

  let store = match &args.config_file {
    Some(path) => TomlSettingsStore::new(path),
    None => TomlSettingsStore::default_location()?,
  };
  let mut settings = store
    .load()
    .with_context(|| format!("failed to load settings from {}", store.path().display()))?;
  if args.no_sync {
    settings.sync_case_across_multiple_cursors = false;
  }

  let text = File::open(&args.file)
    .and_then(|file| Rope::from_reader(BufReader::new(file)))
    .with_context(|| format!("failed to read {}", args.file.display()))?;
  let mut buffer = Buffer::new(text).with_selections(args.selection_set());

  let command = ToggleCase::new(settings)
    .with_mode(args.mode())
    .with_action(args.action)
    .with_options(args.options())
    .with_grouping(Grouped);

  for _ in 0..args.times {
    command.run(&mut buffer)?;
  }
  log::info!(
    "{} ran {} time(s), {} undo step(s)",
    ToggleCase::ID,
    args.times,
    buffer.history().undo_depth()
  );

  if args.write {
    let file = File::create(&args.file)
      .with_context(|| format!("failed to write {}", args.file.display()))?;
    let mut writer = BufWriter::new(file);
    buffer.text().write_to(&mut writer)?;
    writer.flush()?;
  } else {
    let mut stdout = io::stdout().lock();
    buffer.text().write_to(&mut stdout)?;
    stdout.flush()?;
  }

  for selection in buffer.selections() {
    if selection.is_empty() {
      eprintln!("{}", display_position(selection.head));
    } else {
      eprintln!(
        "{}-{}",
        display_position(selection.anchor),
        display_position(selection.head)
      );
    }
  }

  Ok(())
}

fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
  let level = match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  let base = fern::Dispatch::new().level(level).format(|out, message, record| {
    out.finish(format_args!(
      "[{}] {}: {}",
      record.level(),
      record.target(),
      message
    ))
  });

  let base = match log_file {
    Some(path) => base.chain(fern::log_file(path)?),
    None => base.chain(io::stderr()),
  };
  base.apply()?;

  Ok(())
}
