//! # http11_chunked
//!
//! HTTP/1.1 chunked 転送エンコーディングのストリーミングデコーダー
//!
//! ## 特徴
//!
//! - **ストリーミング**: `BufRead` から読み、`Read` としてチャンクデータを返す
//! - **固定メモリ**: 下位ストリームのバッファ以外に確保しない
//! - **厳密**: 不正な 16 進数字、範囲外のチャンクサイズ、壊れた CRLF はエラー
//! - **エラーの保持**: 一度失敗したデコーダーは同じエラーを返し続ける
//!
//! ## 使い方
//!
//! ```rust
//! use std::io::Read;
//! use http11_chunked::ChunkedReader;
//!
//! let body = b"4\r\nWiki\r\n5\r\npedia\r\nC\r\n in\r\nchunks.\r\n0\r\n\r\n";
//! let mut reader = ChunkedReader::new(&body[..]);
//!
//! let mut decoded = String::new();
//! reader.read_to_string(&mut decoded).unwrap();
//! assert_eq!(decoded, "Wikipedia in\r\nchunks.");
//! ```
//!
//! ### 制限付き
//!
//! ```rust
//! use http11_chunked::{ChunkedReader, DecoderLimits, Error};
//!
//! let limits = DecoderLimits {
//!     max_body_size: 4,
//!     ..Default::default()
//! };
//! let mut reader = ChunkedReader::with_limits(&b"5\r\nhello\r\n0\r\n\r\n"[..], limits);
//! let mut buf = [0u8; 16];
//! assert!(matches!(
//!     reader.read_chunked(&mut buf),
//!     Err(Error::BodyTooLarge { size: 5, limit: 4 })
//! ));
//! ```
//!
//! ### ソケットなどバッファなしのストリーム
//!
//! ```rust,no_run
//! use std::io::Read;
//! use std::net::TcpStream;
//! use http11_chunked::ChunkedReader;
//!
//! # fn main() -> std::io::Result<()> {
//! let stream = TcpStream::connect("127.0.0.1:8080")?;
//! // HTTP ヘッダーは読み終えている前提
//! let mut reader = ChunkedReader::from_reader(stream);
//! let mut body = Vec::new();
//! reader.read_to_end(&mut body)?;
//! # Ok(())
//! # }
//! ```

mod decoder;
mod error;
mod limits;

pub use decoder::ChunkedReader;
pub use error::Error;
pub use limits::DecoderLimits;
