//! Interaction mode state machine.
//!
//! The move target lives inside [`ModeState::ManipulationMoving`], so "placing
//! while a move is pending" cannot be represented.

use crate::scene::ObjectIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeState {
    /// Taps spawn new objects.
    #[default]
    Placement,
    /// Selection, scale and rotation controls are active.
    Manipulation,
    /// The next valid tap relocates `target`.
    ManipulationMoving { target: ObjectIndex },
}

impl ModeState {
    /// Whether pose resolution and tap handling run this tick.
    pub fn is_placement_capable(self) -> bool {
        matches!(self, ModeState::Placement | ModeState::ManipulationMoving { .. })
    }

    pub fn move_target(self) -> Option<ObjectIndex> {
        match self {
            ModeState::ManipulationMoving { target } => Some(target),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModeState::Placement => "Placement",
            ModeState::Manipulation => "Manipulation",
            ModeState::ManipulationMoving { .. } => "Moving",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    EnterPlacement,
    EnterManipulation,
    /// Carries the currently resolved selection, if any.
    BeginMove { selected: Option<ObjectIndex> },
    /// The placement engine finished relocating the move target.
    Relocated,
}

/// Applies `event` to `current` and returns the successor state.
///
/// Events a state does not define leave it unchanged.
pub fn transition(current: ModeState, event: ModeEvent) -> ModeState {
    match (current, event) {
        (ModeState::Placement, ModeEvent::EnterManipulation) => ModeState::Manipulation,

        (ModeState::Manipulation, ModeEvent::EnterPlacement) => ModeState::Placement,
        (ModeState::Manipulation, ModeEvent::BeginMove { selected: Some(target) }) => {
            ModeState::ManipulationMoving { target }
        }

        (ModeState::ManipulationMoving { .. }, ModeEvent::Relocated) => ModeState::Manipulation,

        (state, _) => state,
    }
}
