use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;
use sketch_codec::{convert, Algorithm, EncodeOptions};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Box,
    Rle,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Box => Algorithm::Box,
            AlgorithmArg::Rle => Algorithm::Rle,
        }
    }
}

/// Converts a .pgm into a .sk sketch, or a .sk sketch back into a .pgm
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    file: PathBuf,
    #[clap(short, long, value_enum, default_value = "box")]
    algorithm: AlgorithmArg,
    #[clap(long)]
    /// never draw one pixel wide boxes as lines
    no_lines: bool,
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = EncodeOptions {
        algorithm: cli.algorithm.into(),
        lines: !cli.no_lines,
    };
    debug!("{:?}", options);

    let written = convert(&cli.file, options)
        .with_context(|| format!("could not convert {}", cli.file.display()))?;

    if !cli.quiet {
        println!("File {} has been written.", written.display());
    }

    Ok(())
}
