#![no_main]

use std::io::BufReader;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use http11_chunked::ChunkedReader;

#[derive(Arbitrary, Debug)]
struct FuzzChunked {
    chunks: Vec<Vec<u8>>,
    upper_hex: bool,
    split_hint: u8,
    read_hint: u8,
}

fn normalize_chunks(mut chunks: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
    chunks.retain(|chunk| !chunk.is_empty());
    if chunks.len() > 64 {
        chunks.truncate(64);
    }
    chunks
}

fn encode(chunks: &[Vec<u8>], upper_hex: bool) -> Vec<u8> {
    let mut body = Vec::new();
    for chunk in chunks {
        let size = if upper_hex {
            format!("{:X}\r\n", chunk.len())
        } else {
            format!("{:x}\r\n", chunk.len())
        };
        body.extend_from_slice(size.as_bytes());
        body.extend_from_slice(chunk);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(b"0\r\n\r\n");
    body
}

fuzz_target!(|input: FuzzChunked| {
    let chunks = normalize_chunks(input.chunks);
    let expected = chunks.concat();
    let encoded = encode(&chunks, input.upper_hex);

    // 下位バッファと読み取りバッファのサイズを変えても結果は同じ
    let split_size = (input.split_hint as usize % 32) + 1;
    let read_size = (input.read_hint as usize % 64) + 1;

    let mut reader = ChunkedReader::new(BufReader::with_capacity(split_size, encoded.as_slice()));
    let mut decoded = Vec::new();
    let mut buf = vec![0u8; read_size];
    loop {
        let n = reader.read_chunked(&mut buf).expect("valid chunked body");
        decoded.extend_from_slice(&buf[..n]);
        if n < read_size {
            break;
        }
    }

    assert!(reader.is_complete());
    assert_eq!(decoded, expected);
});
