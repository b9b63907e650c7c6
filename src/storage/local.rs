use super::{StorageBackend, StorageItem};
use crate::processing::types::PathKind;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ローカルファイルシステム用のストレージバックエンド
#[derive(Clone, Debug, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    /// ブロッキング走査本体
    ///
    /// ファイル名順に深さ優先で辿る。シンボリックリンクは辿らない。
    fn walk_blocking(root: &Path) -> Result<Vec<StorageItem>> {
        let mut items = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("Failed to walk directory: {}", root.display()))?;

            // ルート自身は含めない
            if entry.depth() == 0 {
                continue;
            }

            items.push(StorageItem {
                path: entry.path().to_path_buf(),
                is_file: entry.file_type().is_file(),
            });
        }

        Ok(items)
    }
}

#[async_trait]
impl StorageBackend for LocalStorageBackend {
    async fn classify(&self, path: &Path) -> Result<PathKind> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(if metadata.is_dir() {
            PathKind::Directory
        } else {
            PathKind::File
        })
    }

    async fn walk(&self, root: &Path) -> Result<Vec<StorageItem>> {
        // 存在しないルートはここで失敗させる
        let metadata = tokio::fs::metadata(root)
            .await
            .with_context(|| format!("Failed to get metadata for: {}", root.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!("Not a directory: {}", root.display());
        }

        let root: PathBuf = root.to_path_buf();
        tokio::task::spawn_blocking(move || Self::walk_blocking(&root))
            .await
            .context("Failed to spawn blocking task for directory walk")?
    }
}
