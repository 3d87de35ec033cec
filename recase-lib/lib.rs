use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod buffer;
pub mod case_action;
pub mod case_convention;
pub mod command;
pub mod cycle;
pub mod editor;
pub mod history;
pub mod movement;
pub mod multi_selection;
pub mod position;
pub mod selection;
pub mod settings;
pub mod transaction;
pub mod word;

pub type Tendril = SmartString<LazyCompact>;
