//! Board grid module.
//!
//! Procedural generation of the tile grid and the repair passes that keep it
//! traversable.

pub mod grid;

pub use grid::*;
