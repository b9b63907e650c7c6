// 変換結果の永続化
//
// - implementations::MemoryResultPersistence - インメモリ（テスト・ライブラリ利用向け）
// - json::JsonReportPersistence               - JSONレポートファイル

pub mod json;
pub mod traits;

// 公開API
pub use json::{JsonReportPersistence, ReportRecord};
pub use traits::*;
