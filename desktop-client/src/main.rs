mod config;
mod constants;
mod event_log;
mod fixed_step;
mod images;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use common::{log, logger};
use eframe::egui;

use config::{GameType, get_config_manager};
use constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use images::ImageLibrary;
use ui::MenuApp;

#[derive(Parser)]
#[command(name = "arcade_client")]
struct Args {
    /// Skip the launcher and open this game.
    #[arg(long, value_enum)]
    game: Option<GameType>,
    /// Config file. Defaults to arcade_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed seed for every session, for reproducible boards.
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the image directory from the config.
    #[arg(long)]
    images: Option<PathBuf>,
    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(args.config.as_deref());
    let config = config_manager.get_config_or_default();
    let images_dir = args.images.unwrap_or_else(|| config.images_dir.clone());
    let images = ImageLibrary::load(images_dir);

    let mut app = MenuApp::new(config_manager, config, images, args.seed);
    if let Some(game_type) = args.game {
        app.start_game(game_type);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_resizable(false)
            .with_title("Arcade"),
        ..Default::default()
    };

    log!("Arcade client started");
    eframe::run_native("Arcade", options, Box::new(|_cc| Ok(Box::new(app))))?;

    Ok(())
}
