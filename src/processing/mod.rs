// 変換処理システムのモジュール
// 機能別フォルダ構造によるアーキテクチャ

// コアモジュール
pub mod error;        // エラー型定義
pub mod types;        // データ構造定義

// 機能モジュール
pub mod config;       // 設定管理
pub mod persistence;  // 変換結果の永続化
pub mod reporting;    // 進捗報告

// 変換パイプライン
pub mod discovery;    // 変換対象の発見
pub mod dispatcher;   // 同時実行数を制限したディスパッチ
pub mod transformer;  // 1ファイル分の変換

// エンジンと組み立て
pub mod api;
pub mod engine;
pub mod implementations;

#[cfg(test)]
pub mod tests;

// 公開API
pub use api::{convert_path, create_webp_engine, create_webp_transformer, WebpEngine, WebpTransformer};
pub use config::ProcessingConfig;
pub use discovery::discover_work_items;
pub use dispatcher::Dispatcher;
pub use engine::ProcessingEngine;
pub use error::{ConvertError, ProcessingError, ProcessingResult};
pub use implementations::{
    ConsoleProgressReporter, DefaultProcessingConfig, ErrorOnlyReporter, MemoryResultPersistence,
    NoOpProgressReporter,
};
pub use persistence::{JsonReportPersistence, ResultPersistence};
pub use reporting::ProgressReporter;
pub use transformer::{ImageTransformer, Transformer};
pub use types::*;
