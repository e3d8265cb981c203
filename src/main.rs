use clap::Parser;
use log::info;
use winit::event_loop::EventLoop;

use party_pascal::cli::Cli;
use party_pascal::{App, GameConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GameConfig::load_or_default(path),
        None => GameConfig::default(),
    };
    config.apply_cli(&cli);

    info!(
        "{}: virtual {}x{}, {} fps cap, assets in {}",
        config.title,
        config.virtual_width,
        config.virtual_height,
        config.target_fps,
        config.asset_dir.display()
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, cli.config.clone());
    event_loop.run_app(&mut app)?;

    Ok(())
}
