//! Unit quaternions for entity orientation.

use super::{Angle, Vec3};

/// Rotation quaternion stored as `(x, y, z, w)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_axis_angle(axis: Vec3, angle: Angle) -> Self {
        let axis = axis.normalize();
        let half = angle.radians() * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Shortest-arc rotation taking direction `from` onto direction `to`.
    ///
    /// Inputs need not be normalized. Opposite vectors rotate half a turn
    /// about an arbitrary perpendicular axis.
    pub fn from_rotation_arc(from: Vec3, to: Vec3) -> Self {
        let a = from.normalize();
        let b = to.normalize();
        let dot = a.dot(b).clamp(-1.0, 1.0);

        if dot < -0.999_999 {
            let mut axis = Vec3::new(1.0, 0.0, 0.0).cross(a);
            if axis.length_squared() < 1e-12 {
                axis = Vec3::UP.cross(a);
            }
            let axis = axis.normalize();
            return Self::new(axis.x, axis.y, axis.z, 0.0);
        }

        if dot > 0.999_999 {
            return Self::IDENTITY;
        }

        let axis = a.cross(b);
        Self::new(axis.x, axis.y, axis.z, 1.0 + dot).normalize()
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalize(self) -> Self {
        let n = self.dot(self).sqrt();
        if n > 1e-10 {
            Self::new(self.x / n, self.y / n, self.z / n, self.w / n)
        } else {
            Self::IDENTITY
        }
    }

    pub fn rotate(self, v: Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v) * 2.0;
        v + t * self.w + qv.cross(t)
    }

    /// Rotation angle in `[0, π]`.
    pub fn angle(self) -> Angle {
        Angle::from_radians(2.0 * self.w.abs().clamp(0.0, 1.0).acos())
    }

    /// Spherical interpolation along the shorter arc.
    pub fn slerp(self, other: Self, t: f64) -> Self {
        let mut dot = self.dot(other);
        let mut b = other;
        if dot < 0.0 {
            b = Self::new(-b.x, -b.y, -b.z, -b.w);
            dot = -dot;
        }

        if dot > 0.9995 {
            return Self::new(
                self.x + t * (b.x - self.x),
                self.y + t * (b.y - self.y),
                self.z + t * (b.z - self.z),
                self.w + t * (b.w - self.w),
            )
            .normalize();
        }

        let theta_0 = dot.clamp(-1.0, 1.0).acos();
        let theta = theta_0 * t;
        let sin_theta = theta.sin();
        let sin_theta_0 = theta_0.sin();

        let s0 = theta.cos() - dot * sin_theta / sin_theta_0;
        let s1 = sin_theta / sin_theta_0;

        Self::new(
            s0 * self.x + s1 * b.x,
            s0 * self.y + s1 * b.y,
            s0 * self.z + s1 * b.z,
            s0 * self.w + s1 * b.w,
        )
    }

    /// Equality up to sign (`q` and `-q` encode the same rotation).
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        1.0 - self.dot(other).abs() <= eps
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;

    /// Hamilton product: `(a * b).rotate(v) == a.rotate(b.rotate(v))`.
    fn mul(self, b: Self) -> Self::Output {
        let a = self;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}
