//! Direction of a selection.
//!
//! ```ignore
//! use recase_lib::{movement::Direction, selection::Selection};
//!
//! let selection = Selection::new((0, 2).into(), (0, 7).into());
//! assert_eq!(selection.direction(), Direction::Forward);
//!
//! let backward = selection.with_direction(Direction::Backward);
//! assert_eq!(backward.head, (0, 2).into());
//! ```

/// Which end of a selection the head sits on, in document order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
  /// Head at or after the anchor.
  Forward,
  /// Head before the anchor.
  Backward,
}
