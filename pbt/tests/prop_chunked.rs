//! ChunkedReader のプロパティテスト

use std::io::{self, Read};

use http11_chunked::{ChunkedReader, DecoderLimits, Error};
use pbt::{
    HexCase, chunk_data, chunk_extension, chunk_list, encode_chunk_with, encode_chunks, hex_case,
    read_buffer_size,
};
use proptest::prelude::*;

/// 固定サイズのバッファで最後まで読む
fn read_with_buffer<R: io::BufRead>(
    reader: &mut ChunkedReader<R>,
    size: usize,
) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; size];
    loop {
        let n = reader.read_chunked(&mut buf)?;
        out.extend_from_slice(&buf[..n]);
        if n < size {
            return Ok(out);
        }
    }
}

fn non_hex_non_terminator() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("not hex digit or terminator", |b| {
        !b.is_ascii_hexdigit() && *b != b'\r' && *b != b';'
    })
}

// ========================================
// ラウンドトリップ
// ========================================

proptest! {
    #[test]
    fn roundtrip(chunks in chunk_list()) {
        let encoded = encode_chunks(&chunks);
        let expected: Vec<u8> = chunks.concat();

        let mut src = encoded.as_slice();
        let mut reader = ChunkedReader::new(&mut src);
        let mut decoded = Vec::new();
        reader.read_to_end(&mut decoded).unwrap();
        prop_assert!(reader.is_complete());
        prop_assert_eq!(reader.body_consumed(), expected.len());
        drop(reader);

        prop_assert_eq!(decoded, expected);
        // 下位ストリームには何も残らない
        prop_assert!(src.is_empty());
    }

    #[test]
    fn roundtrip_any_buffer_size(chunks in chunk_list(), size in read_buffer_size()) {
        let encoded = encode_chunks(&chunks);
        let expected: Vec<u8> = chunks.concat();

        let mut reader = ChunkedReader::new(encoded.as_slice());
        let decoded = read_with_buffer(&mut reader, size).unwrap();
        prop_assert_eq!(decoded, expected);
        prop_assert!(reader.is_complete());
    }

    #[test]
    fn roundtrip_hex_case_and_extensions(
        chunks in proptest::collection::vec(
            (chunk_data(), hex_case(), proptest::option::of(chunk_extension())),
            0..6
        ),
        last_extension in proptest::option::of(chunk_extension()),
    ) {
        let mut encoded = Vec::new();
        let mut expected = Vec::new();
        for (data, case, ext) in &chunks {
            encoded.extend(encode_chunk_with(data, *case, ext.as_deref()));
            expected.extend_from_slice(data);
        }
        match last_extension {
            Some(ext) => encoded.extend(format!("0;{}\r\n\r\n", ext).as_bytes()),
            None => encoded.extend(b"0\r\n\r\n"),
        }

        let mut reader = ChunkedReader::new(encoded.as_slice());
        let mut decoded = Vec::new();
        reader.read_to_end(&mut decoded).unwrap();
        prop_assert_eq!(decoded, expected);
    }
}

// ========================================
// fill-or-fail-or-finish
// ========================================

proptest! {
    #[test]
    fn short_read_only_at_end(chunks in chunk_list(), size in read_buffer_size()) {
        let encoded = encode_chunks(&chunks);
        let total = chunks.iter().map(Vec::len).sum::<usize>();

        let mut reader = ChunkedReader::new(encoded.as_slice());
        let mut buf = vec![0u8; size];
        let mut read = 0;
        loop {
            let n = reader.read_chunked(&mut buf).unwrap();
            read += n;
            if n < size {
                // 短い読み取りは終端に達したときだけ
                prop_assert!(reader.is_complete());
                prop_assert_eq!(read, total);
                break;
            }
            prop_assert!(read <= total);
        }
        prop_assert_eq!(reader.read_chunked(&mut buf).unwrap(), 0);
    }
}

// ========================================
// チャンクサイズ
// ========================================

proptest! {
    #[test]
    fn chunk_size_parsed(size in any::<usize>(), case in hex_case(), zeros in 0usize..4) {
        let hex = match case {
            HexCase::Lower => format!("{:x}", size),
            HexCase::Upper => format!("{:X}", size),
        };
        let input = format!("{}{}\r\n", "0".repeat(zeros), hex);

        // データがないので失敗するが、サイズは計上されている
        let mut reader = ChunkedReader::new(input.as_bytes());
        let err = reader.read_chunked(&mut [0u8; 1]).unwrap_err();
        prop_assert_eq!(err.io_kind(), Some(io::ErrorKind::UnexpectedEof));
        prop_assert_eq!(reader.body_consumed(), size);
    }

    #[test]
    fn chunk_size_out_of_range(size in (usize::MAX as u128 + 1)..=u128::MAX) {
        let input = format!("{:x}\r\n", size);
        let mut reader = ChunkedReader::new(input.as_bytes());
        let result = reader.read_chunked(&mut [0u8; 1]);
        prop_assert!(matches!(result, Err(Error::LengthOutOfRange)));
    }

    #[test]
    fn chunk_size_limit(limit in 1usize..=0xffff, size in 1usize..=0x1ffff) {
        let limits = DecoderLimits {
            max_chunk_size: limit,
            ..Default::default()
        };
        let input = format!("{:x}\r\n", size);
        let mut reader = ChunkedReader::with_limits(input.as_bytes(), limits);
        let result = reader.read_chunked(&mut [0u8; 1]);
        if size > limit {
            prop_assert!(matches!(result, Err(Error::LengthOutOfRange)));
        } else {
            prop_assert_eq!(reader.body_consumed(), size);
        }
    }

    #[test]
    fn invalid_length_character(b in non_hex_non_terminator()) {
        let input = [b'5', b, b'\r', b'\n'];
        let mut reader = ChunkedReader::new(&input[..]);
        let result = reader.read_chunked(&mut [0u8; 8]);
        prop_assert!(matches!(result, Err(Error::InvalidLengthCharacter(c)) if c == b));
    }
}

// ========================================
// 区切り
// ========================================

proptest! {
    #[test]
    fn invalid_delimiter_after_body(
        data in chunk_data(),
        delimiter in (any::<u8>(), any::<u8>()).prop_filter("not CRLF", |d| *d != (b'\r', b'\n')),
    ) {
        let mut input = format!("{:x}\r\n", data.len()).into_bytes();
        input.extend_from_slice(&data);
        input.push(delimiter.0);
        input.push(delimiter.1);
        input.extend_from_slice(b"0\r\n\r\n");

        let mut reader = ChunkedReader::new(input.as_slice());
        let mut buf = vec![0u8; data.len()];

        // データは先に返り、区切りのエラーは次の呼び出しで返る
        prop_assert_eq!(reader.read_chunked(&mut buf).unwrap(), data.len());
        prop_assert_eq!(&buf, &data);
        let result = reader.read_chunked(&mut buf);

        let (expected, actual) = if delimiter.0 != b'\r' {
            (b'\r', delimiter.0)
        } else {
            (b'\n', delimiter.1)
        };
        prop_assert!(matches!(
            result,
            Err(Error::InvalidDelimiter { expected: e, actual: a }) if e == expected && a == actual
        ), "unexpected result: {:?}", result);
    }
}

// ========================================
// 不正な入力
// ========================================

proptest! {
    #[test]
    fn arbitrary_input_sticky(
        input in proptest::collection::vec(any::<u8>(), 0..128),
        size in read_buffer_size(),
    ) {
        let mut reader = ChunkedReader::new(input.as_slice());
        let mut buf = vec![0u8; size];

        // 有限の入力は必ずどこかで終わる
        // データを返した呼び出しは少なくとも 1 バイト消費している
        let mut last = None;
        for _ in 0..=input.len() + 1 {
            match reader.read_chunked(&mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    last = Some(e);
                    break;
                }
            }
        }

        match last {
            Some(first) => {
                let second = reader.read_chunked(&mut buf).unwrap_err();
                prop_assert_eq!(first.to_string(), second.to_string());
                prop_assert!(reader.error().is_some());
            }
            None => {
                prop_assert!(reader.is_complete());
                prop_assert_eq!(reader.read_chunked(&mut buf).unwrap(), 0);
            }
        }
    }

    #[test]
    fn truncated_input_never_completes(chunks in chunk_list(), cut in any::<prop::sample::Index>()) {
        let encoded = encode_chunks(&chunks);
        let cut = cut.index(encoded.len());

        let mut reader = ChunkedReader::new(&encoded[..cut]);
        let mut decoded = Vec::new();
        let err = reader.read_to_end(&mut decoded).unwrap_err();
        prop_assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        prop_assert!(!reader.is_complete());
    }
}
