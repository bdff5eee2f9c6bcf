//! Seams to the device-tracking collaborators: surface raycasts and camera state.
//!
//! The interaction core only sees the [`SurfaceQuery`] and [`CameraView`]
//! traits. [`SimulatedDevice`] implements both for desktop runs.

mod camera;
#[cfg(test)]
pub mod fake;
mod simulated;

pub use camera::{CameraController, CameraMovement};
pub use simulated::{DetectedPlane, SimulatedDevice};

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Which detected planes a raycast may hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneFilter {
    /// Only hits inside the detected boundary polygon of a plane.
    #[default]
    WithinPolygon,
    /// Planes are treated as unbounded.
    Infinite,
}

/// One intersection returned by the surface query service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub position: Vec3,
    pub rotation: Quat,
    pub distance: f32,
}

pub trait SurfaceQuery {
    /// Casts from `screen_point` and appends hits to `hits`, nearest first.
    fn raycast(&self, screen_point: Vec2, filter: PlaneFilter, hits: &mut Vec<SurfaceHit>);
}

pub trait CameraView {
    fn forward(&self) -> Vec3;
    fn screen_center(&self) -> Vec2;
}
