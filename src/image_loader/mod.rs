use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;

pub mod standard;

/// 画像読み込みの結果情報
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// 読み込まれた画像
    pub image: DynamicImage,
    /// 画像サイズ
    pub dimensions: (u32, u32),
    /// 内容から推定した入力フォーマット
    pub format: Option<image::ImageFormat>,
}

/// 画像読み込み（デコード）バックエンドのトレイト
#[async_trait]
pub trait ImageLoaderBackend: Send + Sync {
    /// バイト配列から画像を読み込む
    async fn load_from_bytes(&self, data: Vec<u8>) -> Result<LoadResult>;
}
