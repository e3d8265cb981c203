// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "party-pascal")]
#[command(about = "Party Pascal - a party game of minigames", long_about = None)]
pub struct Cli {
    /// JSON config file; the display mode chosen in-game is saved back to it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start in fullscreen
    #[arg(long, default_value = "false")]
    pub fullscreen: bool,

    /// Frame cap (0 for uncapped)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Directory images are loaded from
    #[arg(long)]
    pub assets: Option<PathBuf>,
}
