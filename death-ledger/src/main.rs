//! binary font build tool
//!
//! Builds the four styles of the family, a stylesheet and a preview page
//! into an output directory.

use std::path::PathBuf;

use clap::Parser;
use death_ledger::{config::BuildConfig, pipeline, Error};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The directory the fonts, stylesheet and page are written to
    #[arg(short, long, default_value = "fontface-set")]
    out_dir: PathBuf,

    /// A TOML build configuration; defaults are used for anything it omits
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compile and verify everything, but write nothing
    #[arg(long)]
    check: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => BuildConfig::load(path)?,
        None => BuildConfig::default(),
    };
    if args.check {
        let artifacts = pipeline::check(&config)?;
        log::info!("check passed: {} artifacts built", artifacts.len());
    } else {
        let written = pipeline::run(&config, &args.out_dir)?;
        log::info!(
            "wrote {} files to '{}'",
            written.len(),
            args.out_dir.display()
        );
    }
    Ok(())
}
