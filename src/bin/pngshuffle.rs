//! Copy a PNG file to standard output with its palette entries shuffled
//!
//! Run: `pngshuffle [-s] [-f FILE] > shuffled.png`

use clap::Parser;
use png_chunk_io::{cli, shuffle_stream, OsRandom, ShuffleOptions, ShuffleReport};
use std::{io, path::PathBuf, process::ExitCode};

const PROGRAM: &str = env!("CARGO_BIN_NAME");

#[derive(Parser)]
#[command(version, about = "Shuffle the PLTE entries of a PNG and write the result to standard output")]
struct Args {
    /// Search the input for the PNG signature instead of expecting it at offset 0
    #[arg(short = 's', long = "scan")]
    scan: bool,

    /// Read from FILE instead of standard input
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,
}

fn run(args: &Args) -> png_chunk_io::Result<ShuffleReport> {
    let mut options = ShuffleOptions::new();
    if args.scan {
        options = options.scan();
    }

    let mut source = cli::Source::open(args.file.as_deref())?;
    let mut stdout = io::BufWriter::new(io::stdout().lock());
    shuffle_stream(&mut source, &mut stdout, &mut OsRandom::new(), &options)
}

fn main() -> ExitCode {
    cli::init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            log::info!(
                "{} chunks written, {} palettes shuffled ({} swaps)",
                report.chunks,
                report.palettes,
                report.swaps
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", PROGRAM, e);
            ExitCode::FAILURE
        }
    }
}
