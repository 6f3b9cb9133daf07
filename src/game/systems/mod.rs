pub mod spawn;
pub mod movement;
pub mod shooting;
pub mod bomb;
pub mod render;

pub use spawn::*;
pub use movement::*;
pub use shooting::*;
pub use bomb::*;
pub use render::*;
