// 変換処理に関連するデータ型定義

use super::error::{ConvertError, ProcessingError, ProcessingResult};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// 出力ファイルに付与する拡張子
pub const OUTPUT_EXTENSION: &str = "webp";

/// 変換対象として認識する拡張子（小文字）
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// 1ファイル分の変換作業
///
/// 生成後は不変。ディスパッチャのタスク1つが排他的に所有する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub sequence_index: usize,
}

impl WorkItem {
    /// 元パスから出力先を導出して作成
    pub fn new(source_path: impl Into<PathBuf>, sequence_index: usize) -> Self {
        let source_path = source_path.into();
        let destination_path = destination_for(&source_path);
        Self {
            source_path,
            destination_path,
            sequence_index,
        }
    }
}

/// `<元パス>.webp` を返す（元の拡張子は残す）
pub fn destination_for(source: &Path) -> PathBuf {
    let mut raw: OsString = source.as_os_str().to_owned();
    raw.push(".");
    raw.push(OUTPUT_EXTENSION);
    PathBuf::from(raw)
}

/// 拡張子が変換対象かどうか（大文字小文字を区別しない）
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// 出力品質 (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> ProcessingResult<Self> {
        if value > Self::MAX {
            return Err(ProcessingError::configuration(format!(
                "品質は0から{}の範囲で指定してください: {value}",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// libwebpに渡す形式
    pub fn as_f32(self) -> f32 {
        f32::from(self.0)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 同時変換数の上限
///
/// 常に1以上。0または未指定はCPU数に置き換える。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyLimit(usize);

impl ConcurrencyLimit {
    /// 0は1に切り上げ、セマフォの上限許可数を超える値は切り詰める
    pub fn new(limit: usize) -> Self {
        Self(limit.clamp(1, tokio::sync::Semaphore::MAX_PERMITS))
    }

    /// ユーザー指定値を解決する。CPU数の問い合わせは実行開始時の一度だけ。
    pub fn resolve(requested: Option<usize>) -> Self {
        match requested {
            Some(limit) if limit > 0 => Self::new(limit),
            _ => Self::new(num_cpus::get()),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ConcurrencyLimit {
    fn default() -> Self {
        Self::resolve(None)
    }
}

/// 変換成功時の情報
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub destination_path: PathBuf,
    pub quality: Quality,
    pub lossless: bool,
    /// 内容から判定した入力フォーマット
    pub source_format: Option<image::ImageFormat>,
    pub bytes_written: u64,
    pub image_dimensions: (u32, u32),
    pub processing_time_ms: u64,
}

/// 個別アイテムの結果
#[derive(Debug)]
pub struct ItemOutcome {
    pub item: WorkItem,
    pub result: Result<ConversionReport, ConvertError>,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 1回の実行の全結果
#[derive(Debug, Default)]
pub struct RunResult {
    /// `sequence_index` 順に並ぶ
    pub outcomes: Vec<ItemOutcome>,
    /// 枠の取得で待たされたタスク数
    pub admission_waits: usize,
    pub elapsed_ms: u64,
}

impl RunResult {
    pub fn converted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.len() - self.converted_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// 処理全体のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub converted_files: usize,
    pub error_count: usize,
    pub admission_waits: usize,
    pub total_processing_time_ms: u64,
    pub average_time_per_file_ms: f64,
}

impl ProcessingSummary {
    pub fn from_run(run: &RunResult) -> Self {
        let total_files = run.outcomes.len();
        let average_time_per_file_ms = if total_files > 0 {
            run.elapsed_ms as f64 / total_files as f64
        } else {
            0.0
        };

        Self {
            total_files,
            converted_files: run.converted_count(),
            error_count: run.error_count(),
            admission_waits: run.admission_waits,
            total_processing_time_ms: run.elapsed_ms,
            average_time_per_file_ms,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// 入力パスの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
}
