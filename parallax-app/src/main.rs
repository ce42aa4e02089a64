//! Parallax Application
//!
//! Loads a depth-augmented capture directory and reports what the
//! reconstruction pipeline would receive from it.

mod app;

use clap::Parser;
use parallax_data::Split;
use std::path::PathBuf;

/// Parallax - inspect multi-view captures with disparity maps
#[derive(Parser, Debug)]
#[command(name = "parallax")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Capture directory containing the manifest, images and disparity maps
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// JSON parser config; command-line flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scale applied to camera translations
    #[arg(long)]
    pub scene_scale: Option<f32>,

    /// Manifest file name inside the capture directory
    #[arg(long)]
    pub manifest: Option<String>,

    /// Dataset split (train, val, test)
    #[arg(short, long, default_value = "train")]
    pub split: Split,

    /// Skip reading image headers
    #[arg(long)]
    pub no_probe_images: bool,

    /// Print every retained image path
    #[arg(long)]
    pub list_images: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn main() {
    let args = Args::parse();
    app::init_logging(&args.log_level);

    if let Err(e) = app::run(&args) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
