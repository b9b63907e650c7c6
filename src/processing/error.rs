// 変換処理のエラー型定義
//
// ProcessingError: 実行全体を止める前提条件エラー
// ConvertError:    1ファイルに閉じたエラー（他のタスクには波及しない）

use std::path::{Path, PathBuf};
use thiserror::Error;

/// 実行全体に関わるエラー
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("ファイル発見エラー: {path} - {source}")]
    FileDiscoveryError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("永続化エラー: {source}")]
    PersistenceError {
        #[source]
        source: anyhow::Error,
    },
}

impl ProcessingError {
    pub fn file_discovery(path: impl AsRef<Path>, source: anyhow::Error) -> Self {
        Self::FileDiscoveryError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn persistence(source: anyhow::Error) -> Self {
        Self::PersistenceError { source }
    }
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// 1ファイルの変換で失敗した工程
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to open source {}: {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to create output file {}: {source}", path.display())]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode to webp {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conversion task for {} did not finish: {message}", path.display())]
    Task { path: PathBuf, message: String },
}

impl ConvertError {
    pub fn task(path: impl Into<PathBuf>, source: tokio::task::JoinError) -> Self {
        Self::Task {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// 失敗した工程名
    pub fn step(&self) -> &'static str {
        match self {
            Self::SourceOpen { .. } => "open",
            Self::Decode { .. } => "decode",
            Self::DestinationCreate { .. } => "create",
            Self::Encode { .. } => "encode",
            Self::Write { .. } => "write",
            Self::Task { .. } => "task",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::SourceOpen { path, .. }
            | Self::Decode { path, .. }
            | Self::DestinationCreate { path, .. }
            | Self::Encode { path, .. }
            | Self::Write { path, .. }
            | Self::Task { path, .. } => path,
        }
    }
}
