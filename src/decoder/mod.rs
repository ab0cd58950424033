//! chunked デコーダーモジュール
//!
//! 下位ストリームから 1 チャンクずつ読み進めるプル型のデコーダーを提供。
//!
//! ## 状態遷移
//!
//! ```text
//! Size ──(size > 0)──> Data ──(データと CRLF を読み終えた)──> Size
//!   │
//!   └──(size == 0 と CRLF)──> Complete
//!
//! どの状態でもエラーが起きれば Failed に遷移し、そのまま戻らない
//! ```
//!
//! ## 使い方
//!
//! ```rust
//! use std::io::Read;
//! use http11_chunked::ChunkedReader;
//!
//! let mut reader = ChunkedReader::new(&b"5\r\nhello\r\n0\r\n\r\n"[..]);
//! let mut body = Vec::new();
//! reader.read_to_end(&mut body).unwrap();
//! assert_eq!(body, b"hello");
//! assert!(reader.is_complete());
//! ```

mod header;
mod phase;
mod reader;

// 公開 API
pub use reader::ChunkedReader;
