//! チャンクサイズ行のパース
//!
//! ```text
//! chunk-size-line = 1*HEXDIG [ ";" chunk-ext ] CRLF
//! ```
//!
//! 16 進数字の直後は `\r` か `;` でなければならない。
//! それ以降は `\n` まで読み飛ばす (チャンク拡張は解釈しない)。

use std::io::{self, BufRead};

use crate::error::Error;
use crate::limits::DecoderLimits;

/// 16 進数字ではないことを示す値
const NOT_HEX: u8 = 0xFF;

/// バイト値から 16 進数字の値への変換表
static HEX_DIGITS: [u8; 256] = {
    let mut table = [NOT_HEX; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'a' as usize + i] = 10 + i as u8;
        table[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
};

/// 16 進数字の値を返す
fn hex_value(b: u8) -> Option<u8> {
    match HEX_DIGITS[b as usize] {
        NOT_HEX => None,
        v => Some(v),
    }
}

/// パース済みのチャンクサイズ行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkHeader {
    /// チャンクデータのバイト数
    pub size: usize,
    /// チャンク拡張が付いていたか (内容は読み飛ばす)
    pub has_extensions: bool,
}

/// 次のバイトを消費せずに覗く
///
/// ストリームが終端に達していれば UnexpectedEof を返す。
pub(super) fn peek_byte<R: BufRead>(src: &mut R) -> Result<u8, Error> {
    loop {
        match src.fill_buf() {
            Ok([]) => return Err(Error::unexpected_eof()),
            Ok(buf) => return Ok(buf[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// 1 バイト読む
pub(super) fn read_byte<R: BufRead>(src: &mut R) -> Result<u8, Error> {
    let b = peek_byte(src)?;
    src.consume(1);
    Ok(b)
}

/// チャンクサイズ行をパースし、行末の LF まで消費する
pub(crate) fn parse_header<R: BufRead>(
    src: &mut R,
    limits: &DecoderLimits,
) -> Result<ChunkHeader, Error> {
    let mut size: usize = 0;
    let mut digits = 0usize;

    let terminator = loop {
        let b = peek_byte(src)?;
        let Some(value) = hex_value(b) else {
            // 数字が 1 つもない行 ("\r\n" や ";ext\r\n") も不正
            if digits > 0 && (b == b'\r' || b == b';') {
                break b;
            }
            src.consume(1);
            return Err(Error::InvalidLengthCharacter(b));
        };
        src.consume(1);
        digits += 1;

        // シフト前に判定してラップアラウンドを防ぐ
        if size > limits.max_chunk_size >> 4 {
            return Err(Error::LengthOutOfRange);
        }
        size = (size << 4) | usize::from(value);
        if size > limits.max_chunk_size {
            return Err(Error::LengthOutOfRange);
        }
    };

    skip_line(src, limits.max_chunk_line_size)?;

    Ok(ChunkHeader {
        size,
        has_extensions: terminator == b';',
    })
}

/// `\n` まで (`\n` を含む) を読み飛ばす
fn skip_line<R: BufRead>(src: &mut R, limit: usize) -> Result<(), Error> {
    let mut skipped = 0usize;
    loop {
        let (found, len) = {
            let available = match src.fill_buf() {
                Ok([]) => return Err(Error::unexpected_eof()),
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => (true, pos + 1),
                None => (false, available.len()),
            }
        };

        skipped = skipped.saturating_add(len);
        if skipped > limit {
            return Err(Error::ChunkLineTooLong {
                size: skipped,
                limit,
            });
        }
        src.consume(len);

        if found {
            return Ok(());
        }
    }
}
