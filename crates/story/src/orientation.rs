//! Orientations that turn a focus point toward the viewer.

use foundation::math::{GeoPoint, Quat, Vec3, lat_lon_to_xyz};
use scene::{CameraProvider, direction_to_camera};

/// Unit direction from the globe center to `focus`.
pub fn focus_direction(focus: GeoPoint, radius: f64) -> Vec3 {
    lat_lon_to_xyz(focus, radius).as_vec3().normalize()
}

/// Rotation taking the globe's up axis onto the focus direction.
pub fn focus_orientation(focus: GeoPoint, radius: f64) -> Quat {
    Quat::from_rotation_arc(Vec3::UP, focus_direction(focus, radius))
}

/// Rotation turning the focus point toward a live camera.
///
/// Without a camera position the focus is turned toward [`Vec3::FORWARD`].
pub fn focus_orientation_toward_camera(
    focus: GeoPoint,
    radius: f64,
    globe_center: Vec3,
    camera: &dyn CameraProvider,
) -> Quat {
    Quat::from_rotation_arc(
        focus_direction(focus, radius),
        direction_to_camera(camera, globe_center),
    )
}

#[cfg(test)]
mod tests {
    use super::{focus_direction, focus_orientation, focus_orientation_toward_camera};
    use foundation::math::{GeoPoint, Vec3};
    use scene::{FixedCamera, NoCamera};

    #[test]
    fn up_lands_on_focus_direction() {
        let focus = GeoPoint::from_degrees(-20.0, 135.0);
        let q = focus_orientation(focus, 0.2);
        assert!(q.rotate(Vec3::UP).approx_eq(focus_direction(focus, 0.2), 1e-9));
    }

    #[test]
    fn camera_variant_points_focus_at_camera() {
        let focus = GeoPoint::from_degrees(47.0, 8.0);
        let center = Vec3::new(0.0, 1.0, -1.0);
        let camera = FixedCamera(Vec3::new(1.0, 1.5, 0.5));
        let q = focus_orientation_toward_camera(focus, 0.2, center, &camera);
        let expected = (camera.0 - center).normalize();
        assert!(q.rotate(focus_direction(focus, 0.2)).approx_eq(expected, 1e-9));
    }

    #[test]
    fn camera_variant_falls_back_to_forward() {
        let focus = GeoPoint::from_degrees(10.0, -70.0);
        let q = focus_orientation_toward_camera(focus, 0.2, Vec3::ZERO, &NoCamera);
        assert!(q.rotate(focus_direction(focus, 0.2)).approx_eq(Vec3::FORWARD, 1e-9));
    }
}
