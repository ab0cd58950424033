//! デコード状態の定義

use crate::error::Error;

/// デコード状態
#[derive(Debug, Clone)]
pub(crate) enum ChunkPhase {
    /// チャンクサイズ行待ち
    Size,
    /// チャンクデータ読み取り中
    Data { remaining: usize },
    /// 終端チャンクと最後の CRLF を受信済み
    Complete,
    /// エラー発生 (以降の読み取りは同じエラーを返す)
    Failed(Error),
}
