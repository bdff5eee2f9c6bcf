//! Interaction core: mode state machine, selection, manipulation and the
//! per-frame controller tying them to the placement pipeline.

mod controller;
mod labels;
mod manipulator;
mod mode;
mod selection;

pub use controller::{Command, FrameOutput, ModeController};
