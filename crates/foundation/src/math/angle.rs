use core::f64::consts::PI;

/// A planar angle.
///
/// The unit is part of every constructor and accessor; there is no way to
/// build an `Angle` from a bare number.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    pub const ZERO: Self = Self { radians: 0.0 };

    pub const fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    pub const fn radians(self) -> f64 {
        self.radians
    }

    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }

    /// Wraps into `(-180°, 180°]`.
    pub fn wrapped(self) -> Self {
        let mut r = self.radians.rem_euclid(2.0 * PI);
        if r > PI {
            r -= 2.0 * PI;
        }
        Self::from_radians(r)
    }
}

impl std::ops::Add for Angle {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::from_radians(self.radians + other.radians)
    }
}

impl std::ops::Sub for Angle {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::from_radians(self.radians - other.radians)
    }
}

impl std::ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_radians(-self.radians)
    }
}

#[cfg(test)]
mod tests {
    use super::Angle;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn degrees_and_radians_agree() {
        let a = Angle::from_degrees(90.0);
        assert_close(a.radians(), core::f64::consts::FRAC_PI_2, 1e-15);
        let b = Angle::from_radians(core::f64::consts::PI);
        assert_close(b.degrees(), 180.0, 1e-12);
    }

    #[test]
    fn wrapped_folds_into_half_open_range() {
        assert_close(Angle::from_degrees(270.0).wrapped().degrees(), -90.0, 1e-9);
        assert_close(Angle::from_degrees(-190.0).wrapped().degrees(), 170.0, 1e-9);
        assert_close(Angle::from_degrees(180.0).wrapped().degrees(), 180.0, 1e-9);
    }
}
