use crate::tracking::{CameraView, PlaneFilter, SurfaceHit, SurfaceQuery};
use glam::{Quat, Vec3};

/// Where a new or relocated object would land this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub valid: bool,
}

impl Default for PlacementPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            valid: false,
        }
    }
}

/// Turns a centre-screen surface raycast into an upright placement pose.
#[derive(Debug, Default)]
pub struct PoseResolver {
    pose: PlacementPose,
    filter: PlaneFilter,
    hits: Vec<SurfaceHit>,
}

impl PoseResolver {
    pub fn new(filter: PlaneFilter) -> Self {
        Self {
            pose: PlacementPose::default(),
            filter,
            hits: Vec::new(),
        }
    }

    /// Last resolved pose. Position and rotation persist across misses.
    #[cfg(test)]
    pub fn pose(&self) -> PlacementPose {
        self.pose
    }

    pub fn resolve<D>(&mut self, device: &D) -> PlacementPose
    where
        D: SurfaceQuery + CameraView,
    {
        self.hits.clear();
        device.raycast(device.screen_center(), self.filter, &mut self.hits);

        self.pose.valid = !self.hits.is_empty();
        if let Some(hit) = self.hits.first() {
            self.pose.position = hit.position;
            if let Some(rotation) = bearing_rotation(device.forward()) {
                self.pose.rotation = rotation;
            }
        }
        self.pose
    }
}

/// Yaw-only rotation facing the horizontal projection of `forward`.
///
/// `None` when `forward` is vertical and has no horizontal bearing.
pub fn bearing_rotation(forward: Vec3) -> Option<Quat> {
    let bearing = Vec3::new(forward.x, 0.0, forward.z).try_normalize()?;
    Some(Quat::from_rotation_y(bearing.x.atan2(bearing.z)))
}

#[cfg(test)]
mod tests {
    use super::{bearing_rotation, PoseResolver};
    use crate::tracking::fake::FakeDevice;
    use crate::tracking::PlaneFilter;
    use glam::{Quat, Vec3};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn first_hit_becomes_position() {
        let mut resolver = PoseResolver::new(PlaneFilter::WithinPolygon);
        let device = FakeDevice::hitting(Vec3::new(1.0, 0.0, 2.0));
        let pose = resolver.resolve(&device);
        assert!(pose.valid);
        assert_eq!(pose.position, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(device.queries.get(), 1);
    }

    #[test]
    fn rotation_discards_pitch() {
        let mut resolver = PoseResolver::new(PlaneFilter::WithinPolygon);
        let device = FakeDevice::hitting(Vec3::ZERO).facing(Vec3::new(1.0, -1.0, 0.0));
        let pose = resolver.resolve(&device);

        let facing = pose.rotation * Vec3::Z;
        assert!(approx(facing, Vec3::X));
        let up = pose.rotation * Vec3::Y;
        assert!(approx(up, Vec3::Y));
    }

    #[test]
    fn miss_keeps_previous_position_and_rotation() {
        let mut resolver = PoseResolver::new(PlaneFilter::WithinPolygon);
        let hit = FakeDevice::hitting(Vec3::new(3.0, 0.0, 1.0)).facing(Vec3::X);
        let first = resolver.resolve(&hit);

        let pose = resolver.resolve(&FakeDevice::missing().facing(Vec3::NEG_Z));
        assert!(!pose.valid);
        assert_eq!(pose.position, first.position);
        assert_eq!(pose.rotation, first.rotation);
    }

    #[test]
    fn hit_buffer_does_not_leak_between_ticks() {
        let mut resolver = PoseResolver::new(PlaneFilter::WithinPolygon);
        resolver.resolve(&FakeDevice::hitting(Vec3::ONE));
        let pose = resolver.resolve(&FakeDevice::missing());
        assert!(!pose.valid);
    }

    #[test]
    fn vertical_forward_has_no_bearing() {
        assert_eq!(bearing_rotation(Vec3::NEG_Y), None);

        let mut resolver = PoseResolver::new(PlaneFilter::WithinPolygon);
        resolver.resolve(&FakeDevice::hitting(Vec3::ZERO).facing(Vec3::X));
        let before = resolver.pose().rotation;
        let pose = resolver.resolve(&FakeDevice::hitting(Vec3::ONE).facing(Vec3::NEG_Y));
        assert!(pose.valid);
        assert_eq!(pose.position, Vec3::ONE);
        assert_eq!(pose.rotation, before);
    }

    #[test]
    fn forward_along_z_is_identity() {
        let rotation = bearing_rotation(Vec3::new(0.0, 0.3, 2.0)).unwrap();
        assert!(rotation.angle_between(Quat::IDENTITY) < 1e-5);
    }
}
