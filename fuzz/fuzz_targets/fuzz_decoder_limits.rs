#![no_main]

use std::io::Read;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use http11_chunked::{ChunkedReader, DecoderLimits};

#[derive(Arbitrary, Debug)]
struct FuzzLimits {
    max_chunk_size: u32,
    max_chunk_line_size: u16,
    max_body_size: u32,
    data: Vec<u8>,
}

fn build_limits(input: &FuzzLimits) -> DecoderLimits {
    DecoderLimits {
        max_chunk_size: input.max_chunk_size as usize,
        max_chunk_line_size: input.max_chunk_line_size as usize,
        max_body_size: input.max_body_size as usize,
    }
}

fuzz_target!(|input: FuzzLimits| {
    let limits = build_limits(&input);

    let mut reader = ChunkedReader::with_limits(input.data.as_slice(), limits);
    let mut body = Vec::new();
    let result = reader.read_to_end(&mut body);

    if result.is_ok() {
        assert!(reader.is_complete());
        assert!(body.len() <= input.max_body_size as usize);
    }
});
