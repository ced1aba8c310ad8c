pub mod angle;
pub mod quat;
pub mod spherical;
pub mod vec;

pub use angle::*;
pub use quat::*;
pub use spherical::*;
pub use vec::*;
