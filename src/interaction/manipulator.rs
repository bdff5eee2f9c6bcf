use crate::scene::{ObjectIndex, ObjectRegistry};
use glam::{Quat, Vec3};

/// Applies slider values to the selected object's transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manipulator;

impl Manipulator {
    /// Sets a uniform scale of `value`. Returns false when nothing is selected.
    pub fn set_scale(
        &self,
        registry: &mut ObjectRegistry,
        selected: Option<ObjectIndex>,
        value: f32,
    ) -> bool {
        let Some(object) = selected.and_then(|index| registry.get_mut(index)) else {
            log::warn!("No selected object to scale");
            return false;
        };
        object.transform.scale = Vec3::splat(value);
        true
    }

    /// Sets a pure yaw of `degrees` about +Y. Returns false when nothing is selected.
    pub fn set_rotation(
        &self,
        registry: &mut ObjectRegistry,
        selected: Option<ObjectIndex>,
        degrees: f32,
    ) -> bool {
        let Some(object) = selected.and_then(|index| registry.get_mut(index)) else {
            log::warn!("No selected object to rotate");
            return false;
        };
        object.transform.rotation = Quat::from_rotation_y(degrees.to_radians());
        true
    }
}
