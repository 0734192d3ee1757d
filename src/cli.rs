//! Shared plumbing for the command-line tools

use crate::error::Result;
use std::{
    fs::File,
    io::{self, BufReader, Cursor, Read, Seek, SeekFrom},
    path::Path,
};

/// Input for a tool run: a named file, or standard input
///
/// Standard input is read into memory up front because pipes cannot seek,
/// and signature scanning needs to.
pub enum Source {
    File(BufReader<File>),
    Stdin(Cursor<Vec<u8>>),
}

impl Source {
    /// Open `path`, or buffer standard input when no path is given
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::File(BufReader::new(File::open(path)?))),
            None => {
                let mut data = Vec::new();
                io::stdin().lock().read_to_end(&mut data)?;
                Ok(Self::Stdin(Cursor::new(data)))
            }
        }
    }
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(file) => file.read(buf),
            Self::Stdin(data) => data.read(buf),
        }
    }
}

impl Seek for Source {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File(file) => file.seek(pos),
            Self::Stdin(data) => data.seek(pos),
        }
    }
}

/// Route `log` output to standard error, filtered by `RUST_LOG` (default `warn`)
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scan_for_signature, test_utils::minimal_indexed_png};

    fn temp_file(name: &str, data: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.bin", name, std::process::id()));
        std::fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_file_source_seeks() {
        let mut data = b"junk".to_vec();
        data.extend(minimal_indexed_png());
        let path = temp_file("png_chunk_io_cli_source", &data);

        let mut source = Source::open(Some(path.as_path())).unwrap();
        assert_eq!(scan_for_signature(&mut source).unwrap(), 4);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_source_scan_large_prefix() {
        let prefix = 4 << 20;
        let mut data = vec![0xA5; prefix];
        data.extend(minimal_indexed_png());
        let path = temp_file("png_chunk_io_cli_large_prefix", &data);

        let mut source = Source::open(Some(path.as_path())).unwrap();
        let mut ihdr = Vec::new();
        let outcome = crate::extract_chunk(
            &mut source,
            &mut ihdr,
            &crate::ExtractOptions::new(crate::ChunkType::IHDR).raw().scan(),
        )
        .unwrap();
        assert!(outcome.is_found());
        assert_eq!(ihdr, crate::test_utils::INDEXED_IHDR);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let result = Source::open(Some(Path::new("/nonexistent/dir/image.png")));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
