//! Game entities module.
//!
//! This module organizes the player record, tank, bullet and wall entities.

pub mod player;
pub mod tank;
pub mod bullet;
pub mod wall;

pub use player::*;
pub use tank::*;
pub use bullet::*;
pub use wall::*;
