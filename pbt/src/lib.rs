//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// chunked エンコード
// ========================================

/// チャンクサイズの 16 進数表記
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexCase {
    Lower,
    Upper,
}

/// 1 チャンク分をエンコード (空データは終端チャンクではなく呼び出し側で除外する)
pub fn encode_chunk_with(data: &[u8], case: HexCase, extension: Option<&str>) -> Vec<u8> {
    let mut buf = Vec::new();
    let size = match case {
        HexCase::Lower => format!("{:x}", data.len()),
        HexCase::Upper => format!("{:X}", data.len()),
    };
    buf.extend_from_slice(size.as_bytes());
    if let Some(ext) = extension {
        buf.push(b';');
        buf.extend_from_slice(ext.as_bytes());
    }
    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(data);
    buf.extend_from_slice(b"\r\n");
    buf
}

/// 複数のデータを chunked 形式でエンコード
///
/// すべてのチャンクを結合し、終端チャンクも追加する。
pub fn encode_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::new();
    for chunk in chunks {
        buf.extend_from_slice(&encode_chunk_with(chunk, HexCase::Lower, None));
    }
    // 終端チャンク
    buf.extend_from_slice(b"0\r\n\r\n");
    buf
}

// ========================================
// Strategy 定義
// ========================================

/// 空でないチャンクデータ
pub fn chunk_data() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 1..256)
}

/// 空でないチャンクの列
pub fn chunk_list() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(chunk_data(), 0..8)
}

/// チャンク拡張: `name` または `name=value` を `;` で連結
pub fn chunk_extension() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        ("[a-z][a-z0-9-]{0,8}", proptest::option::of("[A-Za-z0-9]{0,8}")),
        1..4,
    )
    .prop_map(|params| {
        params
            .into_iter()
            .map(|(name, value)| match value {
                Some(v) => format!("{}={}", name, v),
                None => name,
            })
            .collect::<Vec<_>>()
            .join(";")
    })
}

/// 16 進数の大文字/小文字
pub fn hex_case() -> impl Strategy<Value = HexCase> {
    prop_oneof![Just(HexCase::Lower), Just(HexCase::Upper)]
}

/// 読み取りバッファサイズ
pub fn read_buffer_size() -> impl Strategy<Value = usize> {
    prop_oneof![1usize..=8, 9usize..=64, Just(4096)]
}
