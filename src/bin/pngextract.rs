//! Extract one chunk from a PNG file
//!
//! Run: `pngextract [-d] [-s] [-n] [-f FILE] CHUNK`

use clap::Parser;
use png_chunk_io::{cli, extract_chunk, ChunkType, ExtractOptions, Extraction};
use std::{io, path::PathBuf, process::ExitCode};

const PROGRAM: &str = env!("CARGO_BIN_NAME");

#[derive(Parser)]
#[command(version, about = "Write the first chunk of the given type to standard output")]
struct Args {
    /// Write the chunk data only, instead of the whole framed chunk
    #[arg(short = 'd', long = "data")]
    data: bool,

    /// Search the input for the PNG signature instead of expecting it at offset 0
    #[arg(short = 's', long = "scan")]
    scan: bool,

    /// Exit with an error if the chunk is not present
    #[arg(short = 'n', long = "require")]
    require: bool,

    /// Read from FILE instead of standard input
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Chunk type to extract, e.g. IHDR or tEXt
    chunk: String,
}

fn run(args: &Args) -> png_chunk_io::Result<Extraction> {
    let target = ChunkType::from_name(&args.chunk)?;

    let mut options = ExtractOptions::new(target);
    if args.data {
        options = options.raw();
    }
    if args.scan {
        options = options.scan();
    }

    let mut source = cli::Source::open(args.file.as_deref())?;
    let mut stdout = io::stdout().lock();
    extract_chunk(&mut source, &mut stdout, &options)
}

fn main() -> ExitCode {
    cli::init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(Extraction::NotFound) if args.require => {
            eprintln!("{}: {}: chunk not found", PROGRAM, args.chunk);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", PROGRAM, e);
            ExitCode::FAILURE
        }
    }
}
