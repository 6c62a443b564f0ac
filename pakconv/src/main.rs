use libpak::RleFlavor;
use pakconv::{compress_file, decompress_file, image_to_pak, pak_info, pak_to_image};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// converts a KotB PAK image to a different image format
    #[command(name = "pakimg")]
    PakToImage {
        /// The pak image
        pak_file: PathBuf,

        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// converts an image to a 16-shade grayscale KotB PAK image
    #[command(name = "imgpak")]
    ImageToPak {
        /// The image
        img_file: PathBuf,
        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Drop trailing rows that are entirely black
        #[arg(long, conflicts_with = "no_cut")]
        cut: bool,
        /// Keep trailing black rows even if the last row is empty
        #[arg(long)]
        no_cut: bool,
    },

    /// prints the header and cutoff information of a KotB PAK image
    Info {
        /// The pak image
        pak_file: PathBuf,
    },

    /// run-length compresses a whole file
    Compress {
        /// The input file
        input: PathBuf,
        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Code layout: standard, westwood or westwood-swapped
        #[arg(short, long, default_value_t = RleFlavor::Standard)]
        flavor: RleFlavor,
    },

    /// decompresses a run-length compressed file
    Decompress {
        /// The input file
        input: PathBuf,
        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Code layout: standard, westwood or westwood-swapped
        #[arg(short, long, default_value_t = RleFlavor::Standard)]
        flavor: RleFlavor,
        /// Expected decompressed size in bytes
        #[arg(short, long)]
        size: usize,
    },
}

fn output_or_default(output: Option<PathBuf>, input: &Path, suffix: &str) -> Result<PathBuf> {
    if let Some(o) = output {
        return Ok(o);
    }
    let mut output = PathBuf::new();
    let Some(dir) = input.parent() else {
        bail!("Invalid input file {}", input.display());
    };
    let Some(Some(filename)) = input.file_stem().map(|os| os.to_str()) else {
        bail!("Invalid input file {}", input.display());
    };
    output.push(dir);
    output.push(format!("{filename}.{suffix}"));
    if output == input {
        bail!("Output would overwrite {}, pass --output", input.display());
    }
    info!("output name: {}", output.display());
    Ok(output)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .init();

    match cli.command {
        Commands::PakToImage { pak_file, output } => {
            let output = output_or_default(output, &pak_file, "png")?;
            pak_to_image(&pak_file, &output)?;
        }
        Commands::ImageToPak {
            img_file,
            output,
            cut,
            no_cut,
        } => {
            let output = output_or_default(output, &img_file, "pak")?;
            let cut = match (cut, no_cut) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            image_to_pak(&img_file, &output, cut)?;
        }
        Commands::Info { pak_file } => {
            print!("{}", pak_info(&pak_file)?);
        }
        Commands::Compress {
            input,
            output,
            flavor,
        } => {
            let output = output_or_default(output, &input, "rle")?;
            compress_file(&input, &output, flavor)?;
        }
        Commands::Decompress {
            input,
            output,
            flavor,
            size,
        } => {
            let output = output_or_default(output, &input, "bin")?;
            decompress_file(&input, &output, flavor, size)?;
        }
    }
    Ok(())
}
