use super::{CameraView, PlaneFilter, SurfaceHit, SurfaceQuery};
use glam::{Quat, Vec2, Vec3};
use std::cell::Cell;

/// Scripted device for tests: returns `hit` (if any) and reports `forward`.
#[derive(Debug, Clone)]
pub struct FakeDevice {
    pub hit: Option<Vec3>,
    pub forward: Vec3,
    pub queries: Cell<usize>,
}

impl FakeDevice {
    pub fn hitting(position: Vec3) -> Self {
        Self {
            hit: Some(position),
            forward: Vec3::Z,
            queries: Cell::new(0),
        }
    }

    pub fn missing() -> Self {
        Self {
            hit: None,
            forward: Vec3::Z,
            queries: Cell::new(0),
        }
    }

    pub fn facing(mut self, forward: Vec3) -> Self {
        self.forward = forward;
        self
    }
}

impl SurfaceQuery for FakeDevice {
    fn raycast(&self, _screen_point: Vec2, _filter: PlaneFilter, hits: &mut Vec<SurfaceHit>) {
        self.queries.set(self.queries.get() + 1);
        if let Some(position) = self.hit {
            hits.push(SurfaceHit {
                position,
                rotation: Quat::IDENTITY,
                distance: position.length(),
            });
            // A farther hit that must never win.
            hits.push(SurfaceHit {
                position: position - Vec3::Y * 10.0,
                rotation: Quat::IDENTITY,
                distance: position.length() + 10.0,
            });
        }
    }
}

impl CameraView for FakeDevice {
    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn screen_center(&self) -> Vec2 {
        Vec2::new(400.0, 300.0)
    }
}
