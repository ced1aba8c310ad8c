//! Latitude/longitude on a sphere centered at the entity origin.
//!
//! Axis convention: the geographic frame has the prime meridian rotated a
//! quarter turn (`lon - 90°`) and is then permuted into the renderer's Y-up
//! frame as `(x, y, z) = (y', z', x')`. Globe orientation and annotation
//! placement both go through these two functions, so they always agree.

use core::f64::consts::FRAC_PI_2;

use super::{Angle, Vec3};

/// Geographic coordinate. Ranges are not enforced here.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GeoPoint {
    pub latitude: Angle,
    pub longitude: Angle,
}

impl GeoPoint {
    pub fn new(latitude: Angle, longitude: Angle) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(Angle::from_degrees(latitude), Angle::from_degrees(longitude))
    }
}

/// Cartesian point on (or off) a sphere, in the entity's local Y-up frame.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SpherePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpherePoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn radius(self) -> f64 {
        self.as_vec3().length()
    }
}

impl From<SpherePoint> for Vec3 {
    fn from(p: SpherePoint) -> Self {
        p.as_vec3()
    }
}

pub fn lat_lon_to_xyz(geo: GeoPoint, radius: f64) -> SpherePoint {
    let lat = geo.latitude.radians();
    let lon = geo.longitude.radians() - FRAC_PI_2;

    let x = radius * lat.cos() * lon.cos();
    let y = radius * lat.cos() * lon.sin();
    let z = radius * lat.sin();

    SpherePoint::new(y, z, x)
}

/// Inverse of [`lat_lon_to_xyz`]. Longitude is undefined at the poles.
///
/// The origin has no direction; it maps to latitude 0° and the longitude
/// `atan2(0, 0) + 90°` rather than NaN.
pub fn xyz_to_lat_lon(point: SpherePoint) -> GeoPoint {
    let x = point.z;
    let y = point.x;
    let z = point.y;

    let r = (x * x + y * y + z * z).sqrt();
    let lat = if r > 0.0 {
        FRAC_PI_2 - (z / r).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };
    let lon = y.atan2(x) + FRAC_PI_2;

    GeoPoint::new(Angle::from_radians(lat), Angle::from_radians(lon))
}
