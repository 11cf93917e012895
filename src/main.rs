//! CLI entry point for compression-guided Markov segmentation

use clap::Parser;
use kmarkov::io::cli::{Cli, Segmenter};

fn main() -> kmarkov::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let segmenter = Segmenter::new(cli);
    segmenter.process()?;
    Ok(())
}
