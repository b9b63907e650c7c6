use super::{ImageLoaderBackend, LoadResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// `image` クレートによる標準的な画像ローダー
///
/// JPEG / PNG / GIF / BMP をデコードする。フォーマットは拡張子ではなく
/// 内容から推定する。
#[derive(Clone, Debug, Default)]
pub struct StandardImageLoader;

impl StandardImageLoader {
    pub fn new() -> Self {
        Self
    }

    fn decode(data: &[u8]) -> Result<(DynamicImage, Option<ImageFormat>)> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .context("Failed to read image header")?;
        let format = reader.format();
        let image = reader.decode().context("Failed to decode image")?;
        Ok((image, format))
    }
}

#[async_trait]
impl ImageLoaderBackend for StandardImageLoader {
    async fn load_from_bytes(&self, data: Vec<u8>) -> Result<LoadResult> {
        let (image, format) = tokio::task::spawn_blocking(move || Self::decode(&data))
            .await
            .context("Failed to spawn blocking task for image loading")??;

        Ok(LoadResult {
            dimensions: (image.width(), image.height()),
            image,
            format,
        })
    }
}
