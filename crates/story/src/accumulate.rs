//! Folding sparse per-node globe states into one dense state.

use foundation::math::{GeoPoint, Quat, Vec3};
use scene::TransformTarget;
use scene::components::Transform;

use crate::config::DEFAULT_GLOBE_RADIUS;
use crate::error::StoryError;
use crate::ids::StoryNodeId;
use crate::model::{Annotation, GlobeState, Story};
use crate::orientation::focus_orientation;

/// Every globe field known after folding, before orientation is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedGlobeState {
    pub position: Vec3,
    pub focus: GeoPoint,
    pub scale: f64,
    pub annotations: Vec<Annotation>,
}

impl Default for AccumulatedGlobeState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            focus: GeoPoint::default(),
            scale: 1.0,
            annotations: Vec::new(),
        }
    }
}

impl AccumulatedGlobeState {
    /// Overwrites each field `patch` sets. An empty annotation list counts
    /// as unset, matching the document format, which omits it.
    pub fn apply(&mut self, patch: &GlobeState) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(focus) = patch.focus {
            self.focus = focus;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if !patch.annotations.is_empty() {
            self.annotations = patch.annotations.clone();
        }
    }

    pub fn resolve(&self, radius: f64) -> ResolvedGlobeState {
        ResolvedGlobeState {
            position: self.position,
            orientation: focus_orientation(self.focus, radius),
            scale: self.scale,
        }
    }
}

/// Dense globe transform for one story node. Derived, never stored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedGlobeState {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f64,
}

impl Default for ResolvedGlobeState {
    fn default() -> Self {
        AccumulatedGlobeState::default().resolve(DEFAULT_GLOBE_RADIUS)
    }
}

impl ResolvedGlobeState {
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.orientation, self.scale)
    }

    pub fn target(&self) -> TransformTarget {
        self.transform().into()
    }
}

/// Folds node states up to and including `target`.
pub fn accumulated_state(
    story: &Story,
    target: StoryNodeId,
) -> Result<AccumulatedGlobeState, StoryError> {
    if story.story_node(target).is_none() {
        return Err(StoryError::NodeNotFound(target));
    }

    let mut state = AccumulatedGlobeState::default();
    for node in &story.story_nodes {
        if let Some(patch) = &node.globe_state
            && !patch.is_empty()
        {
            state.apply(patch);
        }
        if node.id == target {
            break;
        }
    }
    Ok(state)
}

/// Resolved globe transform as of `target`, on a globe of the default radius.
pub fn accumulate(story: &Story, target: StoryNodeId) -> Result<ResolvedGlobeState, StoryError> {
    accumulate_with_radius(story, target, DEFAULT_GLOBE_RADIUS)
}

pub fn accumulate_with_radius(
    story: &Story,
    target: StoryNodeId,
    radius: f64,
) -> Result<ResolvedGlobeState, StoryError> {
    Ok(accumulated_state(story, target)?.resolve(radius))
}

#[cfg(test)]
mod tests {
    use super::{AccumulatedGlobeState, ResolvedGlobeState, accumulate, accumulated_state};
    use crate::error::StoryError;
    use crate::ids::StoryNodeId;
    use crate::model::{Annotation, GlobeState, Story, StoryNode};
    use foundation::math::{Angle, GeoPoint, Quat, Vec3, lat_lon_to_xyz};
    use pretty_assertions::assert_eq;

    fn node(name: &str, state: Option<GlobeState>) -> StoryNode {
        let node = StoryNode::new(name);
        match state {
            Some(state) => node.with_globe_state(state),
            None => node,
        }
    }

    #[test]
    fn first_node_without_state_yields_defaults() {
        let mut story = Story::new("s");
        let first = story.add_story_node(node("first", None));
        story.add_story_node(node("second", Some(GlobeState::default().with_scale(3.0))));

        let resolved = accumulate(&story, first).expect("node exists");
        assert_eq!(resolved, ResolvedGlobeState::default());
        assert_eq!(resolved.position, Vec3::ZERO);
        assert_eq!(resolved.scale, 1.0);
    }

    #[test]
    fn fields_persist_across_nodes_that_do_not_set_them() {
        let mut story = Story::new("s");
        story.add_story_node(node("a", Some(GlobeState::default().with_scale(2.0))));
        story.add_story_node(node(
            "b",
            Some(GlobeState::default().with_position(Vec3::new(1.0, 0.0, 0.0))),
        ));
        let c = story.add_story_node(node("c", Some(GlobeState::default())));

        let resolved = accumulate(&story, c).expect("node exists");
        assert_eq!(resolved.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(resolved.scale, 2.0);
        assert_eq!(resolved.orientation, ResolvedGlobeState::default().orientation);
    }

    #[test]
    fn last_write_wins() {
        let mut story = Story::new("s");
        story.add_story_node(node("a", Some(GlobeState::default().with_scale(2.0))));
        let b = story.add_story_node(node("b", Some(GlobeState::default().with_scale(5.0))));
        assert_eq!(accumulate(&story, b).expect("node exists").scale, 5.0);
    }

    #[test]
    fn later_nodes_do_not_leak_backwards() {
        let mut story = Story::new("s");
        let a = story.add_story_node(node("a", Some(GlobeState::default().with_scale(2.0))));
        story.add_story_node(node("b", Some(GlobeState::default().with_scale(5.0))));
        assert_eq!(accumulate(&story, a).expect("node exists").scale, 2.0);
    }

    #[test]
    fn unknown_node_is_not_found_even_in_empty_story() {
        let empty = Story::new("empty");
        let ghost = StoryNodeId::new();
        assert_eq!(accumulate(&empty, ghost), Err(StoryError::NodeNotFound(ghost)));

        let mut story = Story::new("s");
        story.add_story_node(node("a", Some(GlobeState::default().with_scale(2.0))));
        assert_eq!(accumulate(&story, ghost), Err(StoryError::NodeNotFound(ghost)));
    }

    #[test]
    fn accumulation_is_idempotent() {
        let mut story = Story::new("s");
        story.add_story_node(node(
            "a",
            Some(
                GlobeState::default()
                    .with_focus(GeoPoint::from_degrees(-12.5, 130.0))
                    .with_position(Vec3::new(0.0, 1.2, -0.8)),
            ),
        ));
        let b = story.add_story_node(node("b", Some(GlobeState::default().with_scale(0.7))));

        let first = accumulate(&story, b).expect("node exists");
        let second = accumulate(&story, b).expect("node exists");
        assert_eq!(first.position.as_array(), second.position.as_array());
        assert_eq!(first.orientation.x.to_bits(), second.orientation.x.to_bits());
        assert_eq!(first.orientation.w.to_bits(), second.orientation.w.to_bits());
        assert_eq!(first.scale.to_bits(), second.scale.to_bits());
    }

    #[test]
    fn start_end_story_faces_zurich() {
        let mut story = Story::new("preview");
        story.add_story_node(node(
            "Start",
            Some(
                GlobeState::default()
                    .with_position(Vec3::ZERO)
                    .with_focus(GeoPoint::from_degrees(47.0, 8.0))
                    .with_scale(1.0),
            ),
        ));
        let end = story.add_story_node(node("End", Some(GlobeState::default().with_scale(1.0))));

        let resolved = accumulate(&story, end).expect("node exists");
        assert_eq!(resolved.position, Vec3::ZERO);
        assert_eq!(resolved.scale, 1.0);

        let expected = lat_lon_to_xyz(GeoPoint::from_degrees(47.0, 8.0), 0.2)
            .as_vec3()
            .normalize();
        assert!(resolved.orientation.rotate(Vec3::UP).approx_eq(expected, 1e-9));
        assert!(!resolved.orientation.approx_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn accumulated_state_keeps_focus_and_annotations() {
        let pin = Annotation::new(Angle::from_degrees(1.0), Angle::from_degrees(2.0), "pin");
        let mut with_pin = GlobeState::default().with_focus(GeoPoint::from_degrees(5.0, 6.0));
        with_pin.annotations.push(pin.clone());

        let mut story = Story::new("s");
        story.add_story_node(node("a", Some(with_pin)));
        let b = story.add_story_node(node("b", None));

        let state = accumulated_state(&story, b).expect("node exists");
        assert_eq!(state.focus, GeoPoint::from_degrees(5.0, 6.0));
        assert_eq!(state.annotations, vec![pin]);
        assert_eq!(state.scale, AccumulatedGlobeState::default().scale);
    }
}
