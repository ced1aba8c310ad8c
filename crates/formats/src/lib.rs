pub mod story_document;

pub use story_document::*;
