//! Camera position provider.
//!
//! Anything that needs the viewer's position takes a `&dyn CameraProvider`
//! explicitly. A provider may have no position (tracking not started,
//! headless host); callers treat that as an absence and fall back to
//! [`Vec3::FORWARD`].

use foundation::math::Vec3;

pub trait CameraProvider {
    /// Current camera position in world space, if known.
    fn camera_position(&self) -> Option<Vec3>;
}

/// Camera that never moves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedCamera(pub Vec3);

impl CameraProvider for FixedCamera {
    fn camera_position(&self) -> Option<Vec3> {
        Some(self.0)
    }
}

/// Provider for hosts without camera tracking.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NoCamera;

impl CameraProvider for NoCamera {
    fn camera_position(&self) -> Option<Vec3> {
        None
    }
}

impl<F> CameraProvider for F
where
    F: Fn() -> Option<Vec3>,
{
    fn camera_position(&self) -> Option<Vec3> {
        self()
    }
}

/// Unit vector from `from` toward the camera, or [`Vec3::FORWARD`] when the
/// camera is unavailable or sits exactly at `from`.
pub fn direction_to_camera(camera: &dyn CameraProvider, from: Vec3) -> Vec3 {
    camera
        .camera_position()
        .map(|c| (c - from).normalize())
        .filter(|d| *d != Vec3::ZERO)
        .unwrap_or(Vec3::FORWARD)
}
