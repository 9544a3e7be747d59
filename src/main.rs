//! Preference Cards - desktop editor for surgical preference cards
//!
//! Reads the container and soft-goods catalogs from IN_DIR and saves cards
//! to `<Doctor>.xlsx` workbooks in OUT_DIR.

use clap::Parser;
use preference_cards::AppConfig;
use std::path::PathBuf;

/// Build and edit surgical preference cards from catalog spreadsheets
#[derive(Parser, Debug)]
#[command(name = "preference_cards")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the container and soft goods catalogs
    in_dir: Option<PathBuf>,

    /// Directory where doctor workbooks are saved (defaults to IN_DIR)
    out_dir: Option<PathBuf>,
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=preference_cards=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting Preference Cards");

    let config = match AppConfig::resolve(args.in_dir.as_deref(), args.out_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to prepare directories: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = preference_cards::ui::launch_gui(config) {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
