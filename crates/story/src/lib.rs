//! Story model and the engine that turns it into globe transforms.

pub mod accumulate;
pub mod codec;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod orientation;
pub mod presenter;
pub mod projector;

pub use accumulate::{
    AccumulatedGlobeState, ResolvedGlobeState, accumulate, accumulate_with_radius,
    accumulated_state,
};
pub use config::PresenterConfig;
pub use error::StoryError;
pub use ids::{AnnotationId, StoryId, StoryNodeId};
pub use model::*;
pub use presenter::{GestureDelta, ModelLoadRequest, PresenterEvent, StoryPresenter};
pub use projector::AnnotationPlacement;
