use scene::ResourceError;

use crate::ids::{AnnotationId, StoryNodeId};

/// Failures surfaced by the story engine. None of them is fatal: the globe
/// keeps its last transform and presentation carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryError {
    /// No node with this id exists in the story. Happens transiently while
    /// the UI is rebuilding; callers keep the globe unchanged.
    NodeNotFound(StoryNodeId),
    /// A marker model failed to load; the annotation stays un-rendered.
    ResourceLoadFailed {
        annotation: AnnotationId,
        source: ResourceError,
    },
    /// No camera position is being tracked.
    CameraUnavailable,
}

impl std::fmt::Display for StoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryError::NodeNotFound(id) => write!(f, "story node not found: {id}"),
            StoryError::ResourceLoadFailed { annotation, source } => {
                write!(f, "failed to load model for annotation {annotation}: {source}")
            }
            StoryError::CameraUnavailable => write!(f, "camera position unavailable"),
        }
    }
}

impl std::error::Error for StoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoryError::ResourceLoadFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
