//! Main application entry point (native).

use clap::Parser;
use inkstroke_app::{App, AppError, AppResult, export_png, load_events};
use inkstroke_core::storage::FileStorage;
use inkstroke_core::{CancelToken, CaptureConfig};
use std::sync::Arc;

mod args;
use args::{Cli, Commands};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CaptureConfig::load(path)?,
        None => CaptureConfig::default(),
    };
    let storage = match cli.data_dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    log::info!("Using session storage at {:?}", storage.base_path());
    let storage = Arc::new(storage);
    let app = App::new(config, storage.clone());

    match cli.command {
        Commands::Replay {
            events,
            exercise,
            checkpoint_every,
            png,
            width,
            height,
        } => {
            let events = load_events(&events)?;
            let (surface, summary) = app.replay(&events, &exercise, checkpoint_every)?;
            println!(
                "session {}: {} event(s), {} line(s), saved to {}",
                summary.session_id,
                summary.events,
                summary.lines,
                storage.resolve(&summary.file_path).display()
            );
            if let Some(path) = png {
                export_png(&surface, &path, width, height, &CancelToken::new())?;
            }
            Ok(())
        }
        Commands::Inspect { file } => {
            let stats = app.summarize(&file)?;
            println!(
                "{} line(s), {} point(s), last timestamp {}",
                stats.lines, stats.points, stats.duration
            );
            Ok(())
        }
        Commands::Refit {
            file,
            output,
            width,
            height,
            scale,
        } => {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(AppError::InvalidArgument(format!("Invalid scale: {}", scale)));
            }
            let lines = app.refit(&file, &output, width, height, scale)?;
            println!("{} line(s) written to {}", lines, storage.resolve(&output).display());
            Ok(())
        }
    }
}
