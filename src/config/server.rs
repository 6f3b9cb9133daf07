/// Runtime server configuration.
///
/// Parsed from the command line; every flag can also be set through the
/// matching `TANK_GRID_*` environment variable.
use std::path::PathBuf;

use clap::Parser;

use crate::config::game::{BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_DIFFICULTY};

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about)]
pub struct ServerArgs {
    /// Server IP address to bind to
    #[clap(short = 'H', long, env = "TANK_GRID_HOST", default_value = "127.0.0.1")]
    pub host: String,
    /// Server port to listen on
    #[clap(short, long, env = "TANK_GRID_PORT", default_value_t = 18080)]
    pub port: u16,
    /// Number of board rows
    #[clap(long, env = "TANK_GRID_HEIGHT", default_value_t = BOARD_HEIGHT)]
    pub height: usize,
    /// Number of board columns
    #[clap(long, env = "TANK_GRID_WIDTH", default_value_t = BOARD_WIDTH)]
    pub width: usize,
    /// Initial difficulty (1-4)
    #[clap(short, long, env = "TANK_GRID_DIFFICULTY", default_value_t = DEFAULT_DIFFICULTY)]
    pub difficulty: u8,
    /// Seed for board generation; wall-clock time when absent
    #[clap(long, env = "TANK_GRID_SEED")]
    pub seed: Option<u64>,
    /// JSON file holding player credentials; kept in memory when absent
    #[clap(long, env = "TANK_GRID_STORE")]
    pub store: Option<PathBuf>,
}

impl ServerArgs {
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
