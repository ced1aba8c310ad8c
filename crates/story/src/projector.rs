//! Placement of annotation markers and labels on the globe.
//!
//! Positions are in the globe state entity's local frame, so markers follow
//! both the story transform and any gesture applied to the globe root.

use foundation::math::{Quat, SpherePoint, Vec3, lat_lon_to_xyz};
use scene::components::Transform;

use crate::ids::{AnnotationId, StoryNodeId};
use crate::model::{Annotation, DEFAULT_MODEL_OFFSET, Story};

/// Where one annotation's marker and label go.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnnotationPlacement {
    /// Surface point under the annotation.
    pub surface: SpherePoint,
    /// Marker model position, lifted off the surface by the model offset.
    pub model_position: Vec3,
    pub orientation: Quat,
    /// Label anchor, lifted off the surface by the label offset.
    pub label_position: Vec3,
}

impl AnnotationPlacement {
    /// Local transform for the marker entity.
    pub fn model_transform(&self) -> Transform {
        Transform::new(self.model_position, self.orientation, 1.0)
    }
}

pub fn position_on_globe(annotation: &Annotation, radius: f64) -> SpherePoint {
    lat_lon_to_xyz(annotation.geo_point(), radius)
}

pub fn model_position(annotation: &Annotation, radius: f64) -> Vec3 {
    model_position_with_default(annotation, radius, DEFAULT_MODEL_OFFSET)
}

fn model_position_with_default(annotation: &Annotation, radius: f64, default_offset: f64) -> Vec3 {
    let p = position_on_globe(annotation, radius).as_vec3();
    let offset = annotation.model_offset.unwrap_or(default_offset);
    p + p.normalize() * offset
}

/// Marker orientation: stands the model up along the surface normal, then
/// turns it about its own up axis by the annotation's longitude.
pub fn orientation(annotation: &Annotation, position: Vec3) -> Quat {
    let stand_up = Quat::from_rotation_arc(Vec3::UP, position.normalize());
    let heading = Quat::from_axis_angle(Vec3::UP, annotation.longitude);
    stand_up * heading
}

pub fn label_position(annotation: &Annotation, radius: f64) -> Vec3 {
    lat_lon_to_xyz(annotation.geo_point(), radius + annotation.offset).as_vec3()
}

/// Full placement, using `default_model_offset` when the annotation sets none.
pub fn placement(
    annotation: &Annotation,
    radius: f64,
    default_model_offset: f64,
) -> AnnotationPlacement {
    let surface = position_on_globe(annotation, radius);
    let model_position = model_position_with_default(annotation, radius, default_model_offset);
    AnnotationPlacement {
        surface,
        model_position,
        orientation: orientation(annotation, model_position),
        label_position: label_position(annotation, radius),
    }
}

/// Placements for the annotations shown at `node`, in the node's order.
///
/// Ids that do not resolve to an annotation are skipped, as is an unknown node.
pub fn project(
    story: &Story,
    node: StoryNodeId,
    radius: f64,
) -> Vec<(AnnotationId, AnnotationPlacement)> {
    project_with_default(story, node, radius, DEFAULT_MODEL_OFFSET)
}

pub fn project_with_default(
    story: &Story,
    node: StoryNodeId,
    radius: f64,
    default_model_offset: f64,
) -> Vec<(AnnotationId, AnnotationPlacement)> {
    story
        .visible_annotations(node)
        .into_iter()
        .map(|a| (a.id, placement(a, radius, default_model_offset)))
        .collect()
}
