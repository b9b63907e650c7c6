// 進捗報告のトレイト定義

use crate::processing::types::{ConversionReport, WorkItem};
use std::path::Path;

/// 進捗報告を抽象化するトレイト
///
/// 複数タスクから同時に呼ばれる。
#[async_trait::async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_files: usize);

    /// タスクが実行枠を得て変換を始めたときの報告
    async fn report_admitted(&self, item: &WorkItem, total: usize);

    /// 1ファイルの変換成功の報告
    async fn report_converted(&self, item: &WorkItem, report: &ConversionReport);

    /// エラー発生時の報告
    async fn report_error(&self, file_path: &Path, error: &str);

    /// 完了数の報告（完了順）
    async fn report_progress(&self, completed: usize, total: usize);

    /// 処理完了時の報告
    async fn report_completed(&self, total_converted: usize, total_errors: usize);
}
