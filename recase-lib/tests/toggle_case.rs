use recase_lib::{
  buffer::Buffer,
  case_action::CaseAction,
  command::ToggleCase,
  editor::{
    EditorHost,
    Grouped,
  },
  multi_selection::MultipleSelectionOptions,
  position::Position,
  selection::{
    Selection,
    SelectionSet,
  },
  settings::Settings,
};

fn caret(line: usize, column: usize) -> Selection {
  Selection::point(Position::new(line, column))
}

fn range(anchor: (usize, usize), head: (usize, usize)) -> Selection {
  Selection::new(anchor.into(), head.into())
}

fn buffer(text: &str, selections: impl IntoIterator<Item = Selection>) -> Buffer {
  Buffer::new(text).with_selections(SelectionSet::new(selections).unwrap())
}

fn synced(sync: bool) -> ToggleCase {
  ToggleCase::new(Settings {
    sync_case_across_multiple_cursors: sync,
  })
}

#[test]
fn sync_follows_primary_selection() {
  let mut buf = buffer("FOO\nBAR BAZ", [range((0, 0), (0, 3)), range((1, 0), (1, 7))]);

  synced(true).run(&mut buf).unwrap();

  assert_eq!(buf.text().to_string(), "foo\nbar baz");
  assert_eq!(buf.selections().selections(), &[
    range((0, 0), (0, 3)),
    range((1, 0), (1, 7)),
  ]);
}

#[test]
fn sync_with_carets_acts_on_words() {
  let mut buf = buffer("FOO\nBAR BAZ", [caret(0, 1), caret(1, 1)]);

  synced(true).run(&mut buf).unwrap();

  assert_eq!(buf.text().to_string(), "foo\nbar BAZ");
  assert_eq!(buf.selections().selections(), &[caret(0, 1), caret(1, 1)]);
}

#[test]
fn sync_applies_primary_target_to_mixed_text() {
  // "bar" is already lowercase, but "FOO" decides: both go to lowercase.
  let mut buf = buffer("FOO\nbar", [caret(0, 0), caret(1, 0)]);
  synced(true).run(&mut buf).unwrap();
  assert_eq!(buf.text().to_string(), "foo\nbar");
}

#[test]
fn primary_is_first_in_host_order() {
  let mut buf = buffer("FOO\nbar", [caret(1, 0), caret(0, 0)]);
  synced(true).run(&mut buf).unwrap();
  // "bar" is primary: lowercase goes to title for everyone.
  assert_eq!(buf.text().to_string(), "Foo\nBar");
}

#[test]
fn without_sync_each_selection_cycles_alone() {
  let mut buf = buffer("FOO\nbar", [caret(0, 0), caret(1, 0)]);
  synced(false).run(&mut buf).unwrap();
  assert_eq!(buf.text().to_string(), "foo\nBar");
}

#[test]
fn each_invocation_captures_a_new_reference() {
  let mut buf = buffer("FOO\nBAR", [caret(0, 0), caret(1, 0)]);
  let command = synced(true);

  command.run(&mut buf).unwrap();
  assert_eq!(buf.text().to_string(), "foo\nbar");

  command.run(&mut buf).unwrap();
  assert_eq!(buf.text().to_string(), "Foo\nBar");
}

#[test]
fn grouped_and_ungrouped_differ_only_in_history() {
  let text = "FOO\nbar\nhELLO";
  let selections = [caret(0, 1), range((1, 0), (1, 3)), caret(2, 5)];

  let mut plain = buffer(text, selections);
  synced(false).run(&mut plain).unwrap();

  let mut grouped = buffer(text, selections);
  synced(false).with_grouping(Grouped).run(&mut grouped).unwrap();

  assert_eq!(plain.text().to_string(), "foo\nBar\nHELLO");
  assert_eq!(plain.text(), grouped.text());
  assert_eq!(plain.selections(), grouped.selections());

  assert_eq!(plain.history().undo_depth(), 3);
  assert_eq!(grouped.history().undo_depth(), 1);

  assert!(grouped.undo().unwrap());
  assert_eq!(grouped.text().to_string(), text);
  assert_eq!(grouped.selections().selections(), &selections);
  assert!(!grouped.undo().unwrap());

  assert!(grouped.redo().unwrap());
  assert_eq!(grouped.text().to_string(), "foo\nBar\nHELLO");

  for _ in 0..3 {
    assert!(plain.undo().unwrap());
  }
  assert_eq!(plain.text().to_string(), text);
}

#[test]
fn same_line_once_processes_first_caret_only() {
  let mut buf = buffer("foo bar", [caret(0, 1), caret(0, 5)]);
  let command =
    synced(false).with_options(MultipleSelectionOptions::default().once_per_line());

  command.run(&mut buf).unwrap();

  assert_eq!(buf.text().to_string(), "Foo bar");
  assert_eq!(buf.selections().selections(), &[caret(0, 1)]);
}

#[test]
fn same_line_repeat_processes_every_caret() {
  let mut buf = buffer("foo bar", [caret(0, 1), caret(0, 5)]);
  synced(false).run(&mut buf).unwrap();
  assert_eq!(buf.text().to_string(), "Foo Bar");
}

#[test]
fn vanished_selection_is_skipped() {
  // Two identical carets merge after the first edit, so index 1 is gone by
  // the time it would be processed and the word is cycled only once.
  let mut buf = buffer("hELLO", [caret(0, 1), caret(0, 1)]);

  synced(false).run(&mut buf).unwrap();

  assert_eq!(buf.text().to_string(), "HELLO");
  assert_eq!(buf.selections().selections(), &[caret(0, 1)]);
  assert_eq!(buf.history().undo_depth(), 1);
}

#[test]
fn explicit_action_overrides_the_cycle() {
  let mut buf = buffer("the lord of the rings", [range((0, 21), (0, 0))]);

  synced(true)
    .with_action(CaseAction::Title)
    .run(&mut buf)
    .unwrap();

  assert_eq!(buf.text().to_string(), "The Lord of the Rings");
  assert_eq!(buf.selections().primary(), range((0, 21), (0, 0)));
}

#[test]
fn selection_handler_sees_collected_selections() {
  let mut buf = buffer("abc def", [caret(0, 1), caret(0, 5)]);
  let options = MultipleSelectionOptions::default()
    .with_selection_handler(|selections| selections.into_iter().take(1).collect());

  synced(false).with_options(options).run(&mut buf).unwrap();

  assert_eq!(buf.text().to_string(), "Abc Def");
  assert_eq!(buf.selections().selections(), &[caret(0, 1)]);
}

#[test]
fn earlier_caret_follows_a_later_edit_on_its_line() {
  // The second caret's word grows by one char, pushing the first caret right.
  let mut buf = buffer("straße foo", [caret(0, 8), caret(0, 1)]);

  synced(false)
    .with_action(CaseAction::Upper)
    .run(&mut buf)
    .unwrap();

  assert_eq!(buf.text().to_string(), "STRASSE FOO");
  assert_eq!(buf.selections().selections(), &[caret(0, 9), caret(0, 1)]);
}

#[test]
fn earlier_selection_follows_a_later_edit_on_its_line() {
  let mut buf = buffer("ß ab", [range((0, 2), (0, 4)), caret(0, 0)]);

  synced(false)
    .with_action(CaseAction::Upper)
    .run(&mut buf)
    .unwrap();

  assert_eq!(buf.text().to_string(), "SS AB");
  assert_eq!(buf.selections().selections(), &[
    range((0, 3), (0, 5)),
    caret(0, 0)
  ]);
}
