use std::fmt;
use std::io;
use std::sync::Arc;

/// chunked デコードエラー
///
/// 一度発生したエラーはデコーダーに保持され、以降の読み取りで同じ値が返される。
/// そのため `Clone` を実装し、I/O エラーは `Arc` で共有する。
#[derive(Debug, Clone)]
pub enum Error {
    /// チャンクサイズに 16 進数字でも終端 (`\r` / `;`) でもないバイトが現れた
    InvalidLengthCharacter(u8),
    /// チャンクサイズが表現可能な最大値を超えた
    LengthOutOfRange,
    /// CRLF 区切りが期待したバイトではなかった
    InvalidDelimiter { expected: u8, actual: u8 },
    /// チャンクサイズ行 (拡張部分) が長すぎる
    ChunkLineTooLong { size: usize, limit: usize },
    /// ボディサイズ超過
    BodyTooLarge { size: usize, limit: usize },
    /// 下位ストリームの I/O エラー (途中終端の UnexpectedEof を含む)
    Io(Arc<io::Error>),
}

impl Error {
    /// 下位ストリームの I/O エラーであれば、その種類を返す
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Error::Io(Arc::new(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "unexpected end of chunked stream",
        )))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLengthCharacter(b) => {
                write!(f, "invalid chunk length character: {:?}", char::from(*b))
            }
            Error::LengthOutOfRange => write!(f, "chunk length out of range"),
            Error::InvalidDelimiter { expected, actual } => write!(
                f,
                "invalid delimiter: {:?} (expected {:?})",
                char::from(*actual),
                char::from(*expected)
            ),
            Error::ChunkLineTooLong { size, limit } => {
                write!(f, "chunk line too long: {} > {}", size, limit)
            }
            Error::BodyTooLarge { size, limit } => {
                write!(f, "body too large: {} > {}", size, limit)
            }
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(Arc::new(e))
    }
}

/// 下位ストリームの I/O エラーは種類とメッセージをそのまま引き継ぎ、
/// それ以外は `InvalidData` として包む
impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(inner) => io::Error::new(inner.kind(), inner.to_string()),
            e => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
