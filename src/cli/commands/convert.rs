use crate::cli::Cli;
use crate::processing::{
    create_webp_engine, ConcurrencyLimit, ConsoleProgressReporter, DefaultProcessingConfig,
    JsonReportPersistence, MemoryResultPersistence, ProcessingConfig, ProcessingSummary, Quality,
    ResultPersistence,
};
use anyhow::Result;
use std::path::PathBuf;

/// --strict指定時、変換に失敗したファイルがあった場合の終了コード
pub const EXIT_ITEM_FAILURES: u8 = 2;

/// Configuration struct for the convert command
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub quality: u8,
    pub threads: usize,
    pub lossless: bool,
    pub report: Option<PathBuf>,
    pub quiet: bool,
}

impl From<&Cli> for ConvertConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            input: cli.input.clone(),
            quality: cli.quality,
            threads: cli.threads,
            lossless: cli.lossless,
            report: cli.report.clone(),
            quiet: cli.quiet,
        }
    }
}

impl ConvertConfig {
    /// 実行時設定を解決する（CPU数の問い合わせはここで一度だけ）
    pub fn processing_config(&self) -> Result<DefaultProcessingConfig> {
        let quality = Quality::new(self.quality)?;
        let limit = ConcurrencyLimit::resolve(Some(self.threads));

        Ok(DefaultProcessingConfig::new()
            .with_max_concurrent(limit.get())
            .with_quality(quality)
            .with_lossless(self.lossless)
            .with_progress_reporting(!self.quiet))
    }
}

/// Execute convert command
///
/// 個々のファイルの失敗はサマリーに含めて返す。前提条件エラーのみErrになる。
pub async fn execute_convert(config: ConvertConfig) -> Result<ProcessingSummary> {
    let processing = config.processing_config()?;

    if !config.quiet {
        println!("🖼️  WebP変換開始");
        println!("   - 入力: {}", config.input.display());
        println!("   - 最大同時変換数: {}", processing.max_concurrent_tasks());
        if processing.lossless() {
            println!("   - 品質: lossless");
        } else {
            println!("   - 品質: {}", processing.quality());
        }
    }

    let summary = match &config.report {
        Some(report) => {
            run_with_persistence(&config, processing, JsonReportPersistence::new(report)).await?
        }
        None => run_with_persistence(&config, processing, MemoryResultPersistence::new()).await?,
    };

    if !config.quiet {
        println!("📊 処理結果:");
        println!("   - 対象ファイル数: {}", summary.total_files);
        println!("   - 変換成功数: {}", summary.converted_files);
        println!("   - エラー数: {}", summary.error_count);
        println!("   - 処理時間: {}ms", summary.total_processing_time_ms);
        if let Some(report) = &config.report {
            println!("📄 結果は {} に保存されました", report.display());
        }
    }

    Ok(summary)
}

async fn run_with_persistence<P>(
    config: &ConvertConfig,
    processing: DefaultProcessingConfig,
    persistence: P,
) -> Result<ProcessingSummary>
where
    P: ResultPersistence,
{
    let reporter = if config.quiet {
        ConsoleProgressReporter::quiet()
    } else {
        ConsoleProgressReporter::new()
    };

    let engine = create_webp_engine(processing, reporter, persistence);
    Ok(engine.process_path(&config.input).await?)
}

/// 終了コードの決定
pub fn exit_code(summary: &ProcessingSummary, strict: bool) -> u8 {
    if strict && summary.has_errors() {
        EXIT_ITEM_FAILURES
    } else {
        0
    }
}
