//! Bilink Binary Entry Point

use bilink_cli::{run, Cli};
use clap::Parser;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("Generation failed: {}", e);
        std::process::exit(1);
    }
}
