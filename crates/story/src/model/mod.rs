pub mod annotation;
pub mod globe_state;
pub mod slide;
pub mod story;
pub mod story_node;

pub use annotation::*;
pub use globe_state::*;
pub use slide::*;
pub use story::*;
pub use story_node::*;
