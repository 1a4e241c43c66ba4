use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inkstroke")]
#[command(about = "Replay and inspect stylus ink capture sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Capture configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Session storage root (defaults to the platform data directory)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a raw pointer event log and save the session
    Replay {
        /// JSON array of raw pointer events
        events: PathBuf,

        /// Exercise the session belongs to
        #[arg(short, long)]
        exercise: String,

        /// Save every N completed lines instead of only at the end
        #[arg(long)]
        checkpoint_every: Option<usize>,

        /// Also export the drawing as a PNG
        #[arg(long)]
        png: Option<PathBuf>,

        /// PNG width in pixels
        #[arg(long, default_value_t = 512)]
        width: u32,

        /// PNG height in pixels
        #[arg(long, default_value_t = 512)]
        height: u32,
    },

    /// Print line and point counts of a session file
    Inspect {
        /// Session file, relative to the storage root
        file: PathBuf,
    },

    /// Clamp a session file into a viewport and write the result
    Refit {
        /// Session file, relative to the storage root
        file: PathBuf,

        /// Output file, relative to the storage root
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        width: f64,

        #[arg(long)]
        height: f64,

        /// Canvas scale factor
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
}
