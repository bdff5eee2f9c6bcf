use super::{CameraController, CameraView, PlaneFilter, SurfaceHit, SurfaceQuery};
use glam::{Quat, Vec2, Vec3};

/// A horizontal plane the simulated tracker reports as detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedPlane {
    pub center: Vec3,
    /// Half size along X and Z.
    pub half_extents: Vec2,
}

impl DetectedPlane {
    fn contains(&self, point: Vec3) -> bool {
        (point.x - self.center.x).abs() <= self.half_extents.x
            && (point.z - self.center.z).abs() <= self.half_extents.y
    }
}

/// Desktop stand-in for a tracked device: a free camera over fixed planes.
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    pub camera: CameraController,
    planes: Vec<DetectedPlane>,
}

impl SimulatedDevice {
    pub fn new(camera: CameraController, planes: Vec<DetectedPlane>) -> Self {
        Self { camera, planes }
    }

    pub fn planes(&self) -> &[DetectedPlane] {
        &self.planes
    }
}

impl SurfaceQuery for SimulatedDevice {
    fn raycast(&self, screen_point: Vec2, filter: PlaneFilter, hits: &mut Vec<SurfaceHit>) {
        let (origin, dir) = self.camera.screen_ray(screen_point);
        if dir.y.abs() < 1e-6 {
            return;
        }

        let first = hits.len();
        for plane in &self.planes {
            let t = (plane.center.y - origin.y) / dir.y;
            if t <= 0.0 || !t.is_finite() {
                continue;
            }
            let point = origin + dir * t;
            if filter == PlaneFilter::WithinPolygon && !plane.contains(point) {
                continue;
            }
            hits.push(SurfaceHit {
                position: point,
                rotation: Quat::IDENTITY,
                distance: t,
            });
        }
        hits[first..].sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }
}

impl CameraView for SimulatedDevice {
    fn forward(&self) -> Vec3 {
        self.camera.basis().0
    }

    fn screen_center(&self) -> Vec2 {
        self.camera.viewport * 0.5
    }
}
