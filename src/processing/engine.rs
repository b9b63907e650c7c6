// 変換処理エンジン
// 入力パスを判定し、バッチ変換か単一ファイル変換を選んで実行する

use super::discovery::discover_work_items;
use super::dispatcher::Dispatcher;
use super::error::{ProcessingError, ProcessingResult};
use super::implementations::ErrorOnlyReporter;
use super::persistence::ResultPersistence;
use super::transformer::Transformer;
use super::types::{ItemOutcome, PathKind, ProcessingSummary, RunResult, WorkItem};
use super::{ProcessingConfig, ProgressReporter};
use crate::storage::StorageBackend;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// 依存性注入による変換処理エンジン
pub struct ProcessingEngine<S, T, C, R, P> {
    storage: S,
    transformer: Arc<T>,
    config: C,
    reporter: Arc<R>,
    persistence: P,
}

impl<S, T, C, R, P> ProcessingEngine<S, T, C, R, P>
where
    S: StorageBackend,
    T: Transformer + 'static,
    C: ProcessingConfig,
    R: ProgressReporter + 'static,
    P: ResultPersistence,
{
    /// コンストラクタインジェクション
    pub fn new(storage: S, transformer: T, config: C, reporter: R, persistence: P) -> Self {
        Self {
            storage,
            transformer: Arc::new(transformer),
            config,
            reporter: Arc::new(reporter),
            persistence,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 入力パスの種類に応じて処理する
    pub async fn process_path(&self, path: &Path) -> ProcessingResult<ProcessingSummary> {
        let kind = self
            .storage
            .classify(path)
            .await
            .map_err(|e| ProcessingError::file_discovery(path, e))?;

        match kind {
            PathKind::Directory => self.process_directory(path).await,
            PathKind::File => self.process_single_file(path).await,
        }
    }

    /// ディレクトリ以下の対象画像をすべて変換する
    ///
    /// 発見に失敗した場合はタスクを1つも起動せずにエラーを返す。
    pub async fn process_directory(&self, root: &Path) -> ProcessingResult<ProcessingSummary> {
        let items = discover_work_items(&self.storage, root).await?;
        let progress = self.config.enable_progress_reporting();
        let limit = self.config.max_concurrent_tasks();
        let quality = self.config.quality();

        tracing::info!(
            root = %root.display(),
            files = items.len(),
            limit,
            quality = quality.value(),
            "starting batch conversion"
        );

        if progress {
            self.reporter.report_started(items.len()).await;
        }

        let run = if progress {
            Dispatcher::new(self.transformer.clone(), self.reporter.clone(), limit)
                .dispatch(items, quality)
                .await
        } else {
            Dispatcher::new(
                self.transformer.clone(),
                Arc::new(ErrorOnlyReporter::new(self.reporter.clone())),
                limit,
            )
            .dispatch(items, quality)
            .await
        };

        self.finish(run).await
    }

    /// 単一ファイルを変換する
    ///
    /// 発見とディスパッチャを通さず、変換処理を直接1回呼ぶ。
    pub async fn process_single_file(&self, path: &Path) -> ProcessingResult<ProcessingSummary> {
        let start_time = Instant::now();
        let item = WorkItem::new(path, 0);
        let progress = self.config.enable_progress_reporting();
        let quality = self.config.quality();

        tracing::info!(path = %path.display(), quality = quality.value(), "converting single file");

        if progress {
            self.reporter.report_started(1).await;
            self.reporter.report_admitted(&item, 1).await;
        }

        let result = self.transformer.transform(&item, quality).await;

        // 失敗は進捗報告の設定に関わらず報告する
        match &result {
            Ok(report) if progress => self.reporter.report_converted(&item, report).await,
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(path = %path.display(), step = error.step(), "conversion failed");
                self.reporter
                    .report_error(&item.source_path, &error.to_string())
                    .await;
            }
        }
        if progress {
            self.reporter.report_progress(1, 1).await;
        }

        let run = RunResult {
            outcomes: vec![ItemOutcome { item, result }],
            admission_waits: 0,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
        self.finish(run).await
    }

    /// 結果を永続化し、サマリーを返す
    async fn finish(&self, run: RunResult) -> ProcessingResult<ProcessingSummary> {
        for outcome in &run.outcomes {
            self.persistence
                .store_outcome(outcome)
                .await
                .map_err(ProcessingError::persistence)?;
        }

        let summary = ProcessingSummary::from_run(&run);

        if self.config.enable_progress_reporting() {
            self.reporter
                .report_completed(summary.converted_files, summary.error_count)
                .await;
        }

        self.persistence
            .finalize(&summary)
            .await
            .map_err(ProcessingError::persistence)?;

        tracing::info!(
            converted = summary.converted_files,
            errors = summary.error_count,
            waits = summary.admission_waits,
            elapsed_ms = summary.total_processing_time_ms,
            "conversion finished"
        );
        Ok(summary)
    }
}
