use crate::processing::types::PathKind;
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::path::{Path, PathBuf};

pub mod local;

/// 走査で見つかったエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageItem {
    /// エントリのパス（走査ルートを含む）
    pub path: PathBuf,
    /// 通常ファイルかどうか（ディレクトリ・シンボリックリンクはfalse）
    pub is_file: bool,
}

impl StorageItem {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_file: true,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_file: false,
        }
    }
}

/// ストレージバックエンドのトレイト
#[automock]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// パスがディレクトリか単一ファイルかを判定する
    async fn classify(&self, path: &Path) -> Result<PathKind>;

    /// ルート以下を再帰的に走査する
    ///
    /// 順序は決定的。途中でI/Oエラーが起きた場合は全体を失敗とする。
    async fn walk(&self, root: &Path) -> Result<Vec<StorageItem>>;
}
