#[macro_use]
extern crate serde_derive;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::warn;
use sketch_codec::Raster;

mod disasm;
mod stats;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the instructions of a sketch as CSV
    Disasm {
        sketch: PathBuf,
        #[clap(short, long)]
        /// write to a file instead of stdout
        out: Option<PathBuf>,
    },
    /// Render the first frame of a sketch to an image
    Render {
        sketch: PathBuf,
        out_file: PathBuf,
        #[clap(short, long)]
        /// also write every shown state as frame-NNN.png
        snapshots: Option<PathBuf>,
    },
    /// Compare encoded sizes of a raster
    Stats { raster: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Disasm { sketch, out } => {
            let bytes = fs::read(&sketch)
                .with_context(|| format!("could not read {}", sketch.display()))?;

            let writer: Box<dyn io::Write> = match out {
                Some(path) => Box::new(
                    fs::File::create(&path)
                        .with_context(|| format!("could not create {}", path.display()))?,
                ),
                None => Box::new(io::stdout().lock()),
            };

            let mut csv = csv::Writer::from_writer(writer);
            for row in disasm::disassemble(&bytes) {
                csv.serialize(row)?;
            }
            csv.flush()?;
        }
        Commands::Render {
            sketch,
            out_file,
            snapshots,
        } => {
            let bytes = fs::read(&sketch)
                .with_context(|| format!("could not read {}", sketch.display()))?;
            let playback = sketch_player::play(&bytes)?;

            if playback.ended && playback.consumed < bytes.len() {
                warn!(
                    "ignoring {} bytes after the first frame",
                    bytes.len() - playback.consumed
                );
            }

            playback
                .canvas
                .surface()
                .save(&out_file)
                .with_context(|| format!("could not save {}", out_file.display()))?;

            if let Some(dir) = snapshots {
                fs::create_dir_all(&dir)?;
                let written = playback.save_snapshots(&dir)?;
                println!("{} snapshots written to {}", written.len(), dir.display());
            }
        }
        Commands::Stats { raster } => {
            let file = fs::File::open(&raster)
                .with_context(|| format!("could not open {}", raster.display()))?;
            let raster = Raster::read_pgm(io::BufReader::new(file))?;

            println!("{}", stats::Report::new(&raster));
        }
    }

    Ok(())
}
