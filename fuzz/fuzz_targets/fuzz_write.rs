#![no_main]

use libfuzzer_sys::fuzz_target;
use png_chunk_io::{
    read_chunk, shuffle_stream, test_utils::ScriptedRandom, ChunkReader, ShuffleOptions,
};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Shuffle whatever PNG can be found, driven by the input's own bytes
    let seeds: Vec<u32> = data.iter().take(64).map(|&b| b as u32 * 257).collect();
    let mut rng = ScriptedRandom::new(seeds);
    let mut output = Vec::new();

    if shuffle_stream(
        &mut Cursor::new(data),
        &mut output,
        &mut rng,
        &ShuffleOptions::new().scan(),
    )
    .is_ok()
    {
        // A successful shuffle must produce a stream that reads back cleanly
        let mut source = Cursor::new(&output[8..]);
        for chunk in ChunkReader::new(&mut source) {
            assert!(chunk.is_ok(), "shuffled output should re-parse");
        }
        assert!(read_chunk(&mut source).is_err(), "nothing follows IEND");
    }
});
