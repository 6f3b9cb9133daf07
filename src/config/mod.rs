/// Main configuration module.
///
/// Re-exports submodules for gameplay constants and server settings.
pub mod game;
pub mod server;
