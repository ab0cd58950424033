//! chunked ボディのストリーミングリーダー

use std::io::{self, BufRead, BufReader, Read};

use log::{debug, trace};

use crate::error::Error;
use crate::limits::DecoderLimits;

use super::header::{parse_header, read_byte};
use super::phase::ChunkPhase;

/// chunked 転送エンコーディングをデコードするリーダー
///
/// 下位のバッファ付きストリームから chunked 形式のバイト列を読み、
/// チャンクデータだけを `Read` として返す。
///
/// `read` は呼び出し側のバッファが埋まるか、終端チャンクに達するか、
/// エラーが発生するまで戻らない。
/// 終端チャンク (`0\r\n\r\n`) の後は `Ok(0)` を返し続ける。
/// エラーは記録され、以降の `read` は下位ストリームに触れずに同じエラーを返す。
/// 同じ呼び出しの中で既にデータを書き込んでいた場合は、先にそのバイト数を
/// `Ok` で返し、エラーは次の呼び出しで返す。
///
/// トレーラーは解釈しない。終端チャンクの後に残ったバイトは
/// [`into_inner`](Self::into_inner) で取り出したストリームから読める。
#[derive(Debug)]
pub struct ChunkedReader<R> {
    /// chunked 形式の下位ストリーム
    inner: R,
    phase: ChunkPhase,
    limits: DecoderLimits,
    /// これまでにデコードしたチャンクデータのバイト数
    body_consumed: usize,
}

impl<R: Read> ChunkedReader<BufReader<R>> {
    /// バッファなしのストリームを `BufReader` で包んでリーダーを作成
    pub fn from_reader(inner: R) -> Self {
        ChunkedReader::new(BufReader::new(inner))
    }
}

impl<R: BufRead> ChunkedReader<R> {
    /// 新しいリーダーを作成
    ///
    /// `&mut R` も `BufRead` なので、ストリームを借用したまま使うこともできる。
    pub fn new(inner: R) -> Self {
        Self::with_limits(inner, DecoderLimits::default())
    }

    /// 制限付きでリーダーを作成
    pub fn with_limits(inner: R, limits: DecoderLimits) -> Self {
        Self {
            inner,
            phase: ChunkPhase::Size,
            limits,
            body_consumed: 0,
        }
    }

    /// 制限設定を取得
    pub fn limits(&self) -> &DecoderLimits {
        &self.limits
    }

    /// 終端チャンクまで読み終えたか
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, ChunkPhase::Complete)
    }

    /// 記録されているエラーを取得
    pub fn error(&self) -> Option<&Error> {
        match &self.phase {
            ChunkPhase::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// これまでにデコードしたチャンクデータのバイト数
    pub fn body_consumed(&self) -> usize {
        self.body_consumed
    }

    /// 下位ストリームへの参照を取得
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// 下位ストリームへの可変参照を取得
    ///
    /// デコード中にストリームを読み進めると、以降のデコード結果は保証されない。
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// 下位ストリームを取り出す
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// チャンクデータを `buf` に読み込む
    ///
    /// `Read::read` と同じだが、エラーを [`Error`] のまま返す。
    pub fn read_chunked(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut written = 0;

        while written < buf.len() {
            match self.phase {
                ChunkPhase::Failed(ref e) => return Err(e.clone()),
                ChunkPhase::Complete => break,
                ChunkPhase::Size => {
                    if let Err(e) = self.next_chunk() {
                        return self.fail_after(written, e);
                    }
                }
                ChunkPhase::Data { remaining } => {
                    let n = remaining.min(buf.len() - written);
                    let drained = n == remaining;
                    let end = written + n;
                    if let Err(e) = self.read_body(&mut buf[written..end], drained, &mut written) {
                        return self.fail_after(written, e);
                    }
                    self.phase = if drained {
                        ChunkPhase::Size
                    } else {
                        ChunkPhase::Data {
                            remaining: remaining - n,
                        }
                    };
                }
            }
        }

        // 空バッファでも記録済みのエラーは返す
        if let ChunkPhase::Failed(ref e) = self.phase {
            return Err(e.clone());
        }
        Ok(written)
    }

    /// チャンクサイズ行を読み、次の状態へ遷移する
    fn next_chunk(&mut self) -> Result<(), Error> {
        let header = parse_header(&mut self.inner, &self.limits)?;
        trace!(
            "chunk header: size={} extensions={}",
            header.size, header.has_extensions
        );

        if header.size == 0 {
            // 終端チャンクの後の CRLF が壊れていれば終端扱いにしない
            self.read_crlf()?;
            debug!("chunked body complete: {} bytes", self.body_consumed);
            self.phase = ChunkPhase::Complete;
            return Ok(());
        }

        let new_size = self
            .body_consumed
            .checked_add(header.size)
            .ok_or(Error::BodyTooLarge {
                size: usize::MAX,
                limit: self.limits.max_body_size,
            })?;
        if new_size > self.limits.max_body_size {
            return Err(Error::BodyTooLarge {
                size: new_size,
                limit: self.limits.max_body_size,
            });
        }
        self.body_consumed = new_size;

        self.phase = ChunkPhase::Data {
            remaining: header.size,
        };
        Ok(())
    }

    /// チャンクデータをちょうど `buf.len()` バイト読み、`written` に加算する
    ///
    /// `drained` が真ならチャンク末尾の CRLF も検証する。
    /// CRLF が壊れていても、読み終えたデータは `written` に計上済み。
    fn read_body(
        &mut self,
        buf: &mut [u8],
        drained: bool,
        written: &mut usize,
    ) -> Result<(), Error> {
        self.inner.read_exact(buf)?;
        *written += buf.len();
        if drained {
            self.read_crlf()?;
        }
        Ok(())
    }

    fn read_crlf(&mut self) -> Result<(), Error> {
        for expected in [b'\r', b'\n'] {
            let actual = read_byte(&mut self.inner)?;
            if actual != expected {
                return Err(Error::InvalidDelimiter { expected, actual });
            }
        }
        Ok(())
    }

    /// エラーを記録して返す
    fn fail(&mut self, e: Error) -> Error {
        debug!("chunked decode failed: {}", e);
        self.phase = ChunkPhase::Failed(e.clone());
        e
    }

    /// エラーを記録する
    ///
    /// この呼び出しで書き込んだデータがあればそのバイト数を返し、
    /// エラーは次の呼び出しで返す。
    fn fail_after(&mut self, written: usize, e: Error) -> Result<usize, Error> {
        let e = self.fail(e);
        if written > 0 { Ok(written) } else { Err(e) }
    }
}

impl<R: BufRead> Read for ChunkedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_chunked(buf).map_err(io::Error::from)
    }
}
