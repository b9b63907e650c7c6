// 同時実行数を制限したバッチディスパッチャ
//
// タスクの生成は制限しない。制限するのは変換工程への入場だけで、
// 入場はセマフォの許可証1枚で表す。全タスクはJoinSetで追跡し、
// N件すべての完了を観測してから戻る。

use super::error::ConvertError;
use super::reporting::ProgressReporter;
use super::transformer::Transformer;
use super::types::{ItemOutcome, Quality, RunResult, WorkItem};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// 1タスク分の完了報告
struct TaskCompletion {
    outcome: ItemOutcome,
    waited_for_admission: bool,
}

/// 同時実行数を制限して変換タスクを配る
pub struct Dispatcher<T, R> {
    transformer: Arc<T>,
    reporter: Arc<R>,
    limit: usize,
}

impl<T, R> Dispatcher<T, R>
where
    T: Transformer + 'static,
    R: ProgressReporter + 'static,
{
    /// `limit` は1からセマフォの上限許可数までに丸める
    pub fn new(transformer: Arc<T>, reporter: Arc<R>, limit: usize) -> Self {
        Self {
            transformer,
            reporter,
            limit: limit.clamp(1, Semaphore::MAX_PERMITS),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 全アイテムを変換し、全タスクの完了後に結果を返す
    ///
    /// 個々の失敗は結果に含めるだけで、他のタスクや待機を中断しない。
    pub async fn dispatch(&self, items: Vec<WorkItem>, quality: Quality) -> RunResult {
        let start_time = Instant::now();
        let total = items.len();
        if total == 0 {
            return RunResult::default();
        }

        let semaphore = Arc::new(Semaphore::new(self.limit));
        let mut tasks = JoinSet::new();
        // タスク自体が落ちた場合にどのアイテムだったかを引くための表
        let mut pending = HashMap::with_capacity(total);

        for item in items {
            let handle = tasks.spawn(run_task(
                item.clone(),
                quality,
                total,
                semaphore.clone(),
                self.transformer.clone(),
                self.reporter.clone(),
            ));
            pending.insert(handle.id(), item);
        }

        let mut outcomes = Vec::with_capacity(total);
        let mut admission_waits = 0;
        while let Some(joined) = tasks.join_next_with_id().await {
            let completion = match joined {
                Ok((id, completion)) => {
                    pending.remove(&id);
                    completion
                }
                // 報告処理のパニックなど。アイテムの失敗として結果に残す
                Err(e) => {
                    let Some(item) = pending.remove(&e.id()) else {
                        tracing::error!(error = %e, "unknown dispatcher task aborted");
                        continue;
                    };
                    tracing::error!(path = %item.source_path.display(), error = %e, "dispatcher task aborted");
                    let result = Err(ConvertError::task(&item.source_path, e));
                    TaskCompletion {
                        outcome: ItemOutcome { item, result },
                        waited_for_admission: false,
                    }
                }
            };

            if completion.waited_for_admission {
                admission_waits += 1;
            }
            outcomes.push(completion.outcome);
            self.reporter.report_progress(outcomes.len(), total).await;
        }

        outcomes.sort_by_key(|o| o.item.sequence_index);
        RunResult {
            outcomes,
            admission_waits,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}

/// 1アイテム分のタスク本体
///
/// 許可証はこの関数のスコープで保持し、どの経路で抜けても返却される。
async fn run_task<T, R>(
    item: WorkItem,
    quality: Quality,
    total: usize,
    semaphore: Arc<Semaphore>,
    transformer: Arc<T>,
    reporter: Arc<R>,
) -> TaskCompletion
where
    T: Transformer + 'static,
    R: ProgressReporter + 'static,
{
    let (permit, waited_for_admission) = match semaphore.clone().try_acquire_owned() {
        Ok(permit) => (Ok(permit), false),
        Err(_) => (semaphore.acquire_owned().await, true),
    };

    let result = match permit {
        Ok(_permit) => {
            tracing::debug!(index = item.sequence_index, waited = waited_for_admission, "admitted");
            reporter.report_admitted(&item, total).await;

            // 変換は別タスクで実行し、パニックもこのアイテムの失敗として扱う
            let task_item = item.clone();
            let handle =
                tokio::spawn(async move { transformer.transform(&task_item, quality).await });
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ConvertError::task(&item.source_path, e)),
            };

            tracing::debug!(index = item.sequence_index, "released");
            result
        }
        // セマフォは閉じないので通常は起きない
        Err(e) => Err(ConvertError::Task {
            path: item.source_path.clone(),
            message: format!("admission failed: {e}"),
        }),
    };

    match &result {
        Ok(report) => reporter.report_converted(&item, report).await,
        Err(error) => {
            tracing::warn!(path = %item.source_path.display(), step = error.step(), "conversion failed");
            reporter.report_error(&item.source_path, &error.to_string()).await;
        }
    }

    TaskCompletion {
        outcome: ItemOutcome { item, result },
        waited_for_admission,
    }
}
