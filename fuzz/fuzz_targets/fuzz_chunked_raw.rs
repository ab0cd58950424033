#![no_main]

use libfuzzer_sys::fuzz_target;
use http11_chunked::ChunkedReader;

fuzz_target!(|data: &[u8]| {
    let mut reader = ChunkedReader::new(data);
    let mut buf = [0u8; 64];

    // 有限の入力なので必ず終端かエラーで止まる
    // データを返した呼び出しは少なくとも 1 バイト消費している
    let mut failed = None;
    for _ in 0..=data.len() {
        match reader.read_chunked(&mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                failed = Some(e.to_string());
                break;
            }
        }
    }

    match failed {
        Some(first) => {
            let second = reader.read_chunked(&mut buf).unwrap_err();
            assert_eq!(first, second.to_string());
        }
        None => {
            assert!(reader.is_complete());
            assert_eq!(reader.read_chunked(&mut buf).unwrap(), 0);
        }
    }
});
