// 高レベル公開API
// WebP変換エンジンを簡単に組み立てるための便利な関数

use super::super::{
    encoder::webp_encoder::WebpEncoder,
    image_loader::standard::StandardImageLoader,
    storage::local::LocalStorageBackend,
};
use super::{
    config::ProcessingConfig,
    error::ProcessingResult,
    persistence::ResultPersistence,
    reporting::ProgressReporter,
    types::ProcessingSummary,
    DefaultProcessingConfig,
    ImageTransformer,
    MemoryResultPersistence,
    NoOpProgressReporter,
    ProcessingEngine,
};
use std::path::Path;

/// 標準ローダーとlibwebpエンコーダーによる変換処理
pub type WebpTransformer = ImageTransformer<StandardImageLoader, WebpEncoder>;

/// ローカルファイルシステム上でWebP変換を行うエンジン
pub type WebpEngine<C, R, P> = ProcessingEngine<LocalStorageBackend, WebpTransformer, C, R, P>;

/// 変換処理の作成
pub fn create_webp_transformer(lossless: bool) -> WebpTransformer {
    let encoder = if lossless {
        WebpEncoder::lossless()
    } else {
        WebpEncoder::new()
    };
    ImageTransformer::new(StandardImageLoader::new(), encoder)
}

/// ProcessingEngine作成のヘルパー関数
///
/// 可逆/非可逆の選択は設定から決める
pub fn create_webp_engine<C, R, P>(config: C, reporter: R, persistence: P) -> WebpEngine<C, R, P>
where
    C: ProcessingConfig,
    R: ProgressReporter + 'static,
    P: ResultPersistence,
{
    let transformer = create_webp_transformer(config.lossless());
    ProcessingEngine::new(
        LocalStorageBackend::new(),
        transformer,
        config,
        reporter,
        persistence,
    )
}

/// 静音エンジンでパスを変換する（ライブラリ利用向け）
pub async fn convert_path(
    path: impl AsRef<Path>,
    config: DefaultProcessingConfig,
) -> ProcessingResult<ProcessingSummary> {
    let engine = create_webp_engine(config, NoOpProgressReporter::new(), MemoryResultPersistence::new());
    engine.process_path(path.as_ref()).await
}
