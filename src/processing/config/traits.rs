// 設定管理のトレイト定義

use super::super::types::Quality;

/// 変換処理の設定を抽象化するトレイト
pub trait ProcessingConfig: Send + Sync {
    /// 最大同時変換数を取得（0はディスパッチャ側で1に切り上げる）
    fn max_concurrent_tasks(&self) -> usize;

    /// 出力品質を取得
    fn quality(&self) -> Quality;

    /// 可逆圧縮で出力するかどうか
    fn lossless(&self) -> bool;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}
