pub mod animation;
pub mod camera;
pub mod components;
pub mod entity;
pub mod prefabs;
pub mod resources;
pub mod world;

pub use animation::*;
pub use camera::*;
pub use resources::*;
pub use world::*;
