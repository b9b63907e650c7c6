// 変換処理システムの基本実装群

use super::persistence::{ReportRecord, ResultPersistence};
use super::types::{ConcurrencyLimit, ConversionReport, ItemOutcome, ProcessingSummary, Quality, WorkItem};
use super::{ProcessingConfig, ProgressReporter};
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultProcessingConfig {
    max_concurrent: usize,
    quality: Quality,
    lossless: bool,
    enable_progress: bool,
}

impl DefaultProcessingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_lossless(mut self, lossless: bool) -> Self {
        self.lossless = lossless;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultProcessingConfig {
    fn default() -> Self {
        Self {
            max_concurrent: ConcurrencyLimit::default().get(),
            quality: Quality::default(),
            lossless: false,
            enable_progress: true,
        }
    }
}

impl ProcessingConfig for DefaultProcessingConfig {
    fn max_concurrent_tasks(&self) -> usize {
        self.max_concurrent
    }

    fn quality(&self) -> Quality {
        self.quality
    }

    fn lossless(&self) -> bool {
        self.lossless
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// コンソール出力による進捗報告実装
///
/// quietでも変換エラーは標準エラー出力に表示する。
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_files: usize) {
        if !self.quiet {
            println!("🚀 Starting conversion of {total_files} files...");
        }
    }

    async fn report_admitted(&self, item: &WorkItem, total: usize) {
        if !self.quiet {
            println!(
                "🔄 {}/{total} Converting: {}",
                item.sequence_index + 1,
                item.source_path.display()
            );
        }
    }

    async fn report_converted(&self, _item: &WorkItem, report: &ConversionReport) {
        if !self.quiet {
            let mode = if report.lossless { " (lossless)" } else { "" };
            println!(
                "✅ Image successfully converted to webp and saved as {}; quality {}{mode}",
                report.destination_path.display(),
                report.quality
            );
        }
    }

    async fn report_error(&self, file_path: &Path, error: &str) {
        eprintln!("❌ Error converting {}: {error}", file_path.display());
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        if !self.quiet && total > 0 && (completed % 100 == 0 || completed == total) {
            let percentage = (completed as f64 / total as f64) * 100.0;
            println!("📊 Progress: {completed}/{total} ({percentage:.1}%)");
        }
    }

    async fn report_completed(&self, total_converted: usize, total_errors: usize) {
        if !self.quiet {
            println!("🏁 Completed! Converted: {total_converted}, Errors: {total_errors}");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ライブラリ利用向け）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_files: usize) {}

    async fn report_admitted(&self, _item: &WorkItem, _total: usize) {}

    async fn report_converted(&self, _item: &WorkItem, _report: &ConversionReport) {}

    async fn report_error(&self, _file_path: &Path, _error: &str) {}

    async fn report_progress(&self, _completed: usize, _total: usize) {}

    async fn report_completed(&self, _total_converted: usize, _total_errors: usize) {}
}

/// エラーだけを内側のレポーターに渡す進捗報告実装
///
/// 進捗報告を無効にした実行でも失敗したファイルは報告する。
#[derive(Debug)]
pub struct ErrorOnlyReporter<R> {
    inner: Arc<R>,
}

impl<R> ErrorOnlyReporter<R> {
    pub fn new(inner: Arc<R>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: ProgressReporter> ProgressReporter for ErrorOnlyReporter<R> {
    async fn report_started(&self, _total_files: usize) {}

    async fn report_admitted(&self, _item: &WorkItem, _total: usize) {}

    async fn report_converted(&self, _item: &WorkItem, _report: &ConversionReport) {}

    async fn report_error(&self, file_path: &Path, error: &str) {
        self.inner.report_error(file_path, error).await;
    }

    async fn report_progress(&self, _completed: usize, _total: usize) {}

    async fn report_completed(&self, _total_converted: usize, _total_errors: usize) {}
}

/// メモリ内保存の永続化実装
///
/// クローンは同じ保存領域を共有する。
#[derive(Debug, Clone, Default)]
pub struct MemoryResultPersistence {
    records: Arc<Mutex<Vec<ReportRecord>>>,
    summary: Arc<Mutex<Option<ProcessingSummary>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryResultPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されたレコード（sequence_index順）
    pub fn records(&self) -> Vec<ReportRecord> {
        let mut records = lock(&self.records).clone();
        records.sort_by_key(|r| r.sequence_index);
        records
    }

    pub fn stored_count(&self) -> usize {
        lock(&self.records).len()
    }

    /// finalize時に受け取ったサマリー
    pub fn summary(&self) -> Option<ProcessingSummary> {
        lock(&self.summary).clone()
    }

    pub fn is_finalized(&self) -> bool {
        lock(&self.summary).is_some()
    }

    pub fn clear(&self) {
        lock(&self.records).clear();
        *lock(&self.summary) = None;
    }
}

#[async_trait]
impl ResultPersistence for MemoryResultPersistence {
    async fn store_outcome(&self, outcome: &ItemOutcome) -> Result<()> {
        lock(&self.records).push(ReportRecord::from(outcome));
        Ok(())
    }

    async fn finalize(&self, summary: &ProcessingSummary) -> Result<()> {
        *lock(&self.summary) = Some(summary.clone());
        Ok(())
    }
}
