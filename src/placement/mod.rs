//! Placement pipeline: raycast result to pose, pose plus tap to spawn or move.

mod engine;
mod pose;

pub use engine::{PlacementEngine, PlacementOutcome};
pub use pose::{PlacementPose, PoseResolver};
