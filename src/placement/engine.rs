use super::PlacementPose;
use crate::scene::{ObjectIndex, ObjectRegistry, ObjectTransform};

/// What a qualifying tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    Spawned(ObjectIndex),
    Relocated(ObjectIndex),
}

/// Spawns new objects or relocates the move target on a tap.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    default_scale: f32,
    noun: String,
}

impl PlacementEngine {
    pub fn new(default_scale: f32, noun: impl Into<String>) -> Self {
        Self {
            default_scale,
            noun: noun.into(),
        }
    }

    /// Handles a tap against `pose`. Invalid poses are ignored.
    ///
    /// With a `move_target` only the target's position changes; otherwise a new
    /// object is appended with the pose's position and rotation.
    pub fn place(
        &self,
        pose: &PlacementPose,
        move_target: Option<ObjectIndex>,
        registry: &mut ObjectRegistry,
    ) -> Option<PlacementOutcome> {
        if !pose.valid {
            log::debug!("Tap ignored: no valid placement pose");
            return None;
        }

        match move_target {
            Some(index) => {
                let Some(object) = registry.get_mut(index) else {
                    log::warn!("Move target {} is not in the registry", index);
                    return None;
                };
                object.transform.position = pose.position;
                log::info!("Moved {} to {:?}", object.display_name(&self.noun), pose.position);
                Some(PlacementOutcome::Relocated(index))
            }
            None => {
                let transform =
                    ObjectTransform::new(pose.position, pose.rotation, self.default_scale);
                let index = registry.push(transform);
                if let Some(object) = registry.get(index) {
                    log::info!("Planted {}", object.display_name(&self.noun));
                }
                Some(PlacementOutcome::Spawned(index))
            }
        }
    }
}
