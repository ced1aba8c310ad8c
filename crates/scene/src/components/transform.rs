use foundation::math::{Quat, Vec3};

/// Local transform of an entity relative to its parent. Scale is uniform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }

    pub fn new(translation: Vec3, rotation: Quat, scale: f64) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn translate(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Maps a point from this transform's local space into the parent space.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.translation + self.rotation.rotate(p * self.scale)
    }

    /// `self` applied after `local`: the world transform of a child whose
    /// parent has world transform `self`.
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(local.translation),
            rotation: (self.rotation * local.rotation).normalize(),
            scale: self.scale * local.scale,
        }
    }

    /// Position and scale interpolate linearly, rotation along the shorter arc.
    pub fn interpolate(&self, to: &Transform, t: f64) -> Transform {
        Transform {
            translation: self.translation.lerp(to.translation, t),
            rotation: self.rotation.slerp(to.rotation, t),
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }

    pub fn approx_eq(&self, other: &Transform, eps: f64) -> bool {
        self.translation.approx_eq(other.translation, eps)
            && self.rotation.approx_eq(other.rotation, eps)
            && (self.scale - other.scale).abs() <= eps
    }
}
