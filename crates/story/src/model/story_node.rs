use serde::{Deserialize, Serialize};

use crate::ids::{AnnotationId, StoryNodeId};
use crate::model::{GlobeState, Slide};

/// One step of a story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryNode {
    #[serde(default)]
    pub id: StoryNodeId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide: Option<Slide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globe_state: Option<GlobeState>,
    /// Annotations shown while this node is active, in display order.
    #[serde(default, rename = "annotationIDs")]
    pub annotation_ids: Vec<AnnotationId>,
}

fn default_name() -> String {
    "Unnamed Story Node".to_string()
}

impl Default for StoryNode {
    fn default() -> Self {
        Self {
            id: StoryNodeId::new(),
            name: default_name(),
            slide: None,
            globe_state: None,
            annotation_ids: Vec::new(),
        }
    }
}

impl StoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_slide(mut self, slide: Slide) -> Self {
        self.slide = Some(slide);
        self
    }

    pub fn with_globe_state(mut self, state: GlobeState) -> Self {
        self.globe_state = Some(state);
        self
    }

    pub fn shows(&self, annotation: AnnotationId) -> bool {
        self.annotation_ids.contains(&annotation)
    }

    /// Appends `annotation` unless already present. Returns `true` if added.
    pub fn show_annotation(&mut self, annotation: AnnotationId) -> bool {
        if self.shows(annotation) {
            return false;
        }
        self.annotation_ids.push(annotation);
        true
    }

    /// Returns `true` if `annotation` was referenced.
    pub fn hide_annotation(&mut self, annotation: AnnotationId) -> bool {
        let before = self.annotation_ids.len();
        self.annotation_ids.retain(|id| *id != annotation);
        self.annotation_ids.len() != before
    }
}
