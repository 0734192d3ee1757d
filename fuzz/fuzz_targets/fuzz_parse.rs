#![no_main]

use libfuzzer_sys::fuzz_target;
use png_chunk_io::{extract_chunk, ChunkReader, ChunkType, ExtractOptions};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Read chunks straight from the input, as if the signature was already consumed
    // This should NEVER panic, only return errors
    for chunk in ChunkReader::new(Cursor::new(data)) {
        match chunk {
            Ok(chunk) => {
                let _ = chunk.crc_is_valid();
                let _ = chunk.chunk_type().is_critical();
            }
            Err(_) => break,
        }
    }

    // Scan for an embedded PNG and pull out its palette
    let mut output = Vec::new();
    let _ = extract_chunk(
        &mut Cursor::new(data),
        &mut output,
        &ExtractOptions::new(ChunkType::PLTE).scan(),
    );
});
