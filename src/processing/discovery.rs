// ファイル発見
//
// ルート以下を走査し、対象拡張子の通常ファイルをWorkItemに変換する。
// 走査は全か無か: 途中で失敗したら部分的なリストは返さない。

use super::error::{ProcessingError, ProcessingResult};
use super::types::{is_supported_image, WorkItem};
use crate::storage::StorageBackend;
use std::path::Path;

/// ディレクトリから変換対象を発見する
///
/// `sequence_index` は走査順に0から振る。進捗表示のためだけの番号で、
/// 実行順序の意味は持たない。
pub async fn discover_work_items<S>(storage: &S, root: &Path) -> ProcessingResult<Vec<WorkItem>>
where
    S: StorageBackend + ?Sized,
{
    let entries = storage
        .walk(root)
        .await
        .map_err(|e| ProcessingError::file_discovery(root, e))?;

    let items: Vec<WorkItem> = entries
        .into_iter()
        .filter(|entry| entry.is_file && is_supported_image(&entry.path))
        .enumerate()
        .map(|(index, entry)| WorkItem::new(entry.path, index))
        .collect();

    tracing::debug!(root = %root.display(), count = items.len(), "discovered work items");
    Ok(items)
}
