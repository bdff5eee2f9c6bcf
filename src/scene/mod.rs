use glam::{Quat, Vec3};
use std::fmt;
use std::num::NonZeroUsize;

/// Spawn-order identity of a placed object. 1-based, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectIndex(NonZeroUsize);

impl ObjectIndex {
    pub const FIRST: ObjectIndex = ObjectIndex(NonZeroUsize::MIN);

    pub fn new(index: usize) -> Option<Self> {
        NonZeroUsize::new(index).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn prev(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }
}

impl fmt::Display for ObjectIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position, orientation and scale of a placed object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl ObjectTransform {
    pub fn new(position: Vec3, rotation: Quat, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::splat(scale),
        }
    }

    /// Heading about +Y in degrees, in `(-180, 180]`.
    pub fn yaw_degrees(&self) -> f32 {
        let facing = self.rotation * Vec3::Z;
        facing.x.atan2(facing.z).to_degrees()
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    index: ObjectIndex,
    pub transform: ObjectTransform,
}

impl PlacedObject {
    pub fn index(&self) -> ObjectIndex {
        self.index
    }

    /// Diagnostic name such as `plant-3`. Lookups always go through the index.
    pub fn display_name(&self, noun: &str) -> String {
        format!("{}-{}", noun.to_lowercase(), self.index)
    }
}

/// Append-only, insertion-ordered store of placed objects.
///
/// Object `k` always lives at slot `k - 1`, so indices are exactly `1..=len()`.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<PlacedObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Appends an object and returns the index it was assigned (the new count).
    pub fn push(&mut self, transform: ObjectTransform) -> ObjectIndex {
        let index = ObjectIndex::new(self.objects.len() + 1).unwrap_or(ObjectIndex::FIRST);
        self.objects.push(PlacedObject { index, transform });
        index
    }

    pub fn get(&self, index: ObjectIndex) -> Option<&PlacedObject> {
        self.objects.get(index.get() - 1)
    }

    pub fn get_mut(&mut self, index: ObjectIndex) -> Option<&mut PlacedObject> {
        self.objects.get_mut(index.get() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }
}
