pub mod types;
pub mod error;
pub mod board;
pub mod tests;

pub mod entities;
pub mod grid;
pub mod systems;
