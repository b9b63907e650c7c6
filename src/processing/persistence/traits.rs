// 結果永続化のトレイト定義

use crate::processing::types::{ItemOutcome, ProcessingSummary};
use anyhow::Result;
use async_trait::async_trait;

/// 変換結果の永続化を抽象化するトレイト
#[async_trait]
pub trait ResultPersistence: Send + Sync {
    /// 1ファイル分の結果を保存
    async fn store_outcome(&self, outcome: &ItemOutcome) -> Result<()>;

    /// 永続化の完了処理
    async fn finalize(&self, summary: &ProcessingSummary) -> Result<()>;
}
