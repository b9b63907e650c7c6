// テスト用の進捗報告モック実装

use super::traits::ProgressReporter;
use crate::processing::types::{ConversionReport, WorkItem};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// 呼び出しを文字列で記録するレポーター
#[derive(Clone, Default)]
pub struct MockProgressReporter {
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl ProgressReporter for MockProgressReporter {
    async fn report_started(&self, total_files: usize) {
        self.push(format!("started:{total_files}"));
    }

    async fn report_admitted(&self, item: &WorkItem, total: usize) {
        self.push(format!("admitted:{}:{total}", item.sequence_index));
    }

    async fn report_converted(&self, _item: &WorkItem, report: &ConversionReport) {
        self.push(format!(
            "converted:{}:{}",
            report.destination_path.display(),
            report.quality
        ));
    }

    async fn report_error(&self, file_path: &Path, error: &str) {
        self.push(format!("error:{}:{error}", file_path.display()));
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        self.push(format!("progress:{completed}:{total}"));
    }

    async fn report_completed(&self, total_converted: usize, total_errors: usize) {
        self.push(format!("completed:{total_converted}:{total_errors}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_progress_reporter_records_calls() {
        let reporter = MockProgressReporter::new();
        let item = WorkItem::new("/photos/a.jpg", 0);

        reporter.report_started(2).await;
        reporter.report_admitted(&item, 2).await;
        reporter.report_error(&item.source_path, "decode failed").await;
        reporter.report_progress(1, 2).await;
        reporter.report_completed(1, 1).await;

        assert_eq!(
            reporter.calls(),
            vec![
                "started:2".to_string(),
                "admitted:0:2".to_string(),
                "error:/photos/a.jpg:decode failed".to_string(),
                "progress:1:2".to_string(),
                "completed:1:1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_progress_reporter_thread_safety() {
        let reporter = MockProgressReporter::new();
        let reporter_ref: &dyn ProgressReporter = &reporter;

        reporter_ref.report_started(10).await;
        reporter_ref.report_progress(5, 10).await;

        assert_eq!(reporter.count_prefix("progress"), 1);
    }
}
