use super::ImageEncoderBackend;
use crate::processing::types::Quality;
use anyhow::{Context, Result};
use async_trait::async_trait;
use image::DynamicImage;

/// libwebpによるWebPエンコーダー
#[derive(Clone, Debug, Default)]
pub struct WebpEncoder {
    lossless: bool,
}

impl WebpEncoder {
    /// 非可逆エンコーダー
    pub fn new() -> Self {
        Self::default()
    }

    /// 可逆エンコーダー
    pub fn lossless() -> Self {
        Self { lossless: true }
    }

    fn encode_blocking(image: &DynamicImage, quality: Quality, lossless: bool) -> Result<Vec<u8>> {
        // libwebpはRGB8/RGBA8のみ受け付けるため全てRGBA8に揃える
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        let encoder = ::webp::Encoder::from_rgba(rgba.as_raw(), width, height);
        let memory = encoder
            .encode_simple(lossless, quality.as_f32())
            .map_err(|e| anyhow::anyhow!("libwebp encoding error: {e:?}"))?;

        Ok(memory.to_vec())
    }
}

#[async_trait]
impl ImageEncoderBackend for WebpEncoder {
    async fn encode(&self, image: DynamicImage, quality: Quality) -> Result<Vec<u8>> {
        let lossless = self.lossless;
        tokio::task::spawn_blocking(move || Self::encode_blocking(&image, quality, lossless))
            .await
            .context("Failed to spawn blocking task for webp encoding")?
    }

    fn is_lossless(&self) -> bool {
        self.lossless
    }
}
