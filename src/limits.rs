/// デコーダーの制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderLimits {
    /// 最大チャンクサイズ (デフォルト: usize::MAX)
    ///
    /// チャンクサイズ行の 16 進数がこの値を超えた時点で
    /// `Error::LengthOutOfRange` になる。
    pub max_chunk_size: usize,
    /// チャンクサイズ行の 16 進数以降の最大長 (デフォルト: usize::MAX)
    ///
    /// チャンク拡張と行末の CRLF を含む。
    /// 信頼できない相手から読む場合は小さい値を設定する。
    pub max_chunk_line_size: usize,
    /// 最大ボディサイズ (デフォルト: usize::MAX)
    pub max_body_size: usize,
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_chunk_size: usize::MAX,
            max_chunk_line_size: usize::MAX,
            max_body_size: usize::MAX,
        }
    }
}

impl DecoderLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_chunk_size: usize::MAX,
            max_chunk_line_size: usize::MAX,
            max_body_size: usize::MAX,
        }
    }
}
