pub mod audio;
pub mod hotspot;
pub mod lookup;
pub mod model;
pub mod navigation;
pub mod share;

pub use model::*;
pub use navigation::*;
