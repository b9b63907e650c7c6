// JSONレポートによる永続化

use super::traits::ResultPersistence;
use crate::processing::types::{ItemOutcome, ProcessingSummary};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// レポート内の1ファイル分のレコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub sequence_index: usize,
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub status: RecordStatus,
    /// 入力フォーマットのMIMEタイプ（例: image/jpeg）
    pub source_format: Option<String>,
    pub quality: Option<u8>,
    pub bytes_written: Option<u64>,
    pub processing_time_ms: Option<u64>,
    /// 失敗した工程 (open / decode / create / encode / write / task)
    pub failed_step: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Converted,
    Failed,
}

impl From<&ItemOutcome> for ReportRecord {
    fn from(outcome: &ItemOutcome) -> Self {
        let item = &outcome.item;
        match &outcome.result {
            Ok(report) => Self {
                sequence_index: item.sequence_index,
                source_path: item.source_path.clone(),
                destination_path: report.destination_path.clone(),
                status: RecordStatus::Converted,
                source_format: report.source_format.map(|f| f.to_mime_type().to_string()),
                quality: Some(report.quality.value()),
                bytes_written: Some(report.bytes_written),
                processing_time_ms: Some(report.processing_time_ms),
                failed_step: None,
                error: None,
            },
            Err(error) => Self {
                sequence_index: item.sequence_index,
                source_path: item.source_path.clone(),
                destination_path: item.destination_path.clone(),
                status: RecordStatus::Failed,
                source_format: None,
                quality: None,
                bytes_written: None,
                processing_time_ms: None,
                failed_step: Some(error.step().to_string()),
                error: Some(error.to_string()),
            },
        }
    }
}

/// レポートファイル全体
#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub total_files: usize,
    pub converted_files: usize,
    pub error_count: usize,
    pub total_processing_time_ms: u64,
    pub items: Vec<ReportRecord>,
}

/// 完了時にJSONレポートを書き出す永続化実装
#[derive(Debug)]
pub struct JsonReportPersistence {
    output_path: PathBuf,
    records: Mutex<Vec<ReportRecord>>,
}

impl JsonReportPersistence {
    pub fn new(output_path: impl AsRef<Path>) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

#[async_trait]
impl ResultPersistence for JsonReportPersistence {
    async fn store_outcome(&self, outcome: &ItemOutcome) -> Result<()> {
        self.records.lock().await.push(ReportRecord::from(outcome));
        Ok(())
    }

    async fn finalize(&self, summary: &ProcessingSummary) -> Result<()> {
        let mut items = self.records.lock().await.clone();
        items.sort_by_key(|r| r.sequence_index);

        let report = RunReport {
            generated_at: Utc::now(),
            total_files: summary.total_files,
            converted_files: summary.converted_files,
            error_count: summary.error_count,
            total_processing_time_ms: summary.total_processing_time_ms,
            items,
        };

        let json = serde_json::to_vec_pretty(&report).context("Failed to serialize run report")?;
        tokio::fs::write(&self.output_path, json)
            .await
            .with_context(|| format!("Failed to write report: {}", self.output_path.display()))?;
        Ok(())
    }
}
